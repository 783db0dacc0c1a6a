//! Damped spring used to smooth pointer-driven motion.
//!
//! The spring is advanced with the closed-form solution of the damped harmonic
//! oscillator rather than by numeric integration, so any step size (including a
//! long frame after the window was hidden) lands exactly on the analytic curve
//! and a zero step leaves the state untouched.

/// Physical constants of a spring. Defaults match the profile card tilt (300 / 30 / 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
        }
    }
}

/// Current value and velocity of one spring-driven scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringState {
    pub value: f32,
    pub velocity: f32,
}

impl SpringConfig {
    fn natural_frequency(&self) -> f32 {
        (self.stiffness.max(f32::EPSILON) / self.mass.max(f32::EPSILON)).sqrt()
    }

    fn damping_ratio(&self) -> f32 {
        let critical = 2.0 * (self.stiffness.max(f32::EPSILON) * self.mass.max(f32::EPSILON)).sqrt();
        self.damping.max(0.0) / critical
    }

    /// Advances `state` towards `target` by `dt` seconds.
    ///
    /// Non-positive or non-finite `dt` returns the state unchanged.
    pub fn step(&self, state: SpringState, target: f32, dt: f32) -> SpringState {
        if !(dt.is_finite() && dt > 0.0) {
            return state;
        }

        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();
        let x0 = state.value - target;
        let v0 = state.velocity;

        let (x, v) = if (zeta - 1.0).abs() < 1e-4 {
            let decay = (-omega * dt).exp();
            let c = v0 + omega * x0;
            (decay * (x0 + c * dt), decay * (v0 - omega * c * dt))
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * dt).exp();
            let (s, c) = (omega_d * dt).sin_cos();
            let b = (v0 + zeta * omega * x0) / omega_d;
            let x = decay * (x0 * c + b * s);
            let v = -zeta * omega * x + decay * omega_d * (b * c - x0 * s);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * dt).exp(), (r2 * dt).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        };

        SpringState {
            value: target + x,
            velocity: v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_step_is_identity() {
        let spring = SpringConfig::default();
        let state = SpringState {
            value: 0.3,
            velocity: -1.2,
        };
        assert_eq!(spring.step(state, 0.0, 0.0), state);
        assert_eq!(spring.step(state, 0.0, -1.0), state);
        assert_eq!(spring.step(state, 0.0, f32::NAN), state);
    }

    #[test]
    fn test_converges_to_target() {
        let spring = SpringConfig::default();
        let state = spring.step(SpringState::default(), 0.5, 2.0);
        assert!((state.value - 0.5).abs() < 1e-3);
        assert!(state.velocity.abs() < 1e-2);
    }

    #[test]
    fn test_moves_towards_target_early() {
        let spring = SpringConfig::default();
        let state = spring.step(SpringState::default(), 0.5, 0.05);
        assert!(state.value > 0.0 && state.value < 0.5);
        assert!(state.velocity > 0.0);
    }

    #[test]
    fn test_split_steps_match_single_step() {
        let spring = SpringConfig::default();
        let whole = spring.step(SpringState::default(), 0.4, 0.2);
        let half = spring.step(SpringState::default(), 0.4, 0.1);
        let split = spring.step(half, 0.4, 0.1);
        assert!((whole.value - split.value).abs() < 1e-4);
        assert!((whole.velocity - split.velocity).abs() < 1e-3);
    }

    #[test]
    fn test_overdamped_and_critical_settle() {
        for damping in [2.0 * 300.0_f32.sqrt(), 120.0] {
            let spring = SpringConfig {
                damping,
                ..SpringConfig::default()
            };
            let state = spring.step(SpringState::default(), -0.5, 3.0);
            assert!((state.value + 0.5).abs() < 1e-3, "damping {damping}");
        }
    }
}
