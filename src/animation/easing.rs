//! Easing curves and keyframe helpers.

/// Timing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Decelerates into the end value (cubic).
    EaseOut,
    /// Slow at both ends (cubic).
    EaseInOut,
}

impl Easing {
    /// Maps `t` in `[0, 1]` through the curve. Input outside the range is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Position within a looping cycle, in `[0, 1)`.
///
/// Before `delay` has elapsed the cycle has not started and this returns `None`.
pub fn loop_progress(elapsed: f32, period: f32, delay: f32) -> Option<f32> {
    let local = elapsed - delay;
    if local < 0.0 || period <= 0.0 {
        return None;
    }
    let progress = (local / period).fract();
    Some(if progress >= 1.0 { 0.0 } else { progress })
}

/// Triangle wave for `[low, high, low]` keyframes: 0 at both ends, 1 at the middle.
pub fn there_and_back(progress: f32) -> f32 {
    1.0 - (2.0 * progress - 1.0).abs()
}

/// Evenly spaced keyframe values over one cycle.
///
/// Each segment between two neighbouring values is eased on its own, so
/// `[0, 1, 1, 0]` rises over the first third, holds, then falls over the last.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes(Vec<f32>);

impl Keyframes {
    /// Keyframes from `values`. An empty list behaves like `[0]`.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values.into();
        if values.is_empty() {
            Self(vec![0.0])
        } else {
            Self(values)
        }
    }

    pub fn constant(value: f32) -> Self {
        Self(vec![value])
    }

    /// `[low, high, low]`.
    pub fn there_and_back(low: f32, high: f32) -> Self {
        Self(vec![low, high, low])
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Value at `progress` in `[0, 1]`, easing each segment with `easing`.
    pub fn sample(&self, progress: f32, easing: Easing) -> f32 {
        let segments = self.0.len().saturating_sub(1);
        if segments == 0 {
            return self.0.first().copied().unwrap_or(0.0);
        }
        let progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
        let position = progress * segments as f32;
        let index = (position.floor() as usize).min(segments - 1);
        let local = position - index as f32;
        let (from, to) = (self.0[index], self.0[index + 1]);
        from + (to - from) * easing.apply(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        let a = Easing::EaseInOut.apply(0.2);
        let b = Easing::EaseInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_apply_clamps() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(3.0), 1.0);
        assert_eq!(Easing::EaseOut.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_loop_progress_respects_delay() {
        assert_eq!(loop_progress(1.0, 4.0, 2.0), None);
        let p = loop_progress(3.0, 4.0, 2.0).unwrap();
        assert!((p - 0.25).abs() < 1e-6);
        let wrapped = loop_progress(10.0, 4.0, 2.0).unwrap();
        assert!(wrapped.abs() < 1e-6);
    }

    #[test]
    fn test_keyframes_hold_between_equal_values() {
        let fade = Keyframes::new([0.0, 1.0, 1.0, 0.0]);
        assert_eq!(fade.sample(0.0, Easing::EaseInOut), 0.0);
        assert!((fade.sample(1.0 / 3.0, Easing::EaseInOut) - 1.0).abs() < 1e-5);
        assert_eq!(fade.sample(0.5, Easing::EaseInOut), 1.0);
        assert!(fade.sample(0.9, Easing::EaseInOut) < 0.5);
        assert!(fade.sample(1.0, Easing::EaseInOut).abs() < 1e-6);
    }

    #[test]
    fn test_keyframes_match_triangle_wave() {
        let track = Keyframes::there_and_back(0.3, 0.8);
        for progress in [0.0, 0.1, 0.25, 0.5, 0.6, 0.9] {
            let expected = 0.3 + 0.5 * Easing::EaseInOut.apply(there_and_back(progress));
            assert!((track.sample(progress, Easing::EaseInOut) - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_keyframe_is_constant() {
        assert_eq!(Keyframes::constant(0.7).sample(0.4, Easing::Linear), 0.7);
        assert_eq!(Keyframes::new(Vec::new()).sample(0.4, Easing::Linear), 0.0);
    }

    #[test]
    fn test_there_and_back() {
        assert_eq!(there_and_back(0.0), 0.0);
        assert_eq!(there_and_back(0.5), 1.0);
        assert!((there_and_back(0.75) - 0.5).abs() < 1e-6);
    }
}
