//! Seeded particle trajectories.
//!
//! Each particle gets its direction, speed, phase and size once, when the scene is
//! mounted. Positions are then a closed-form function of elapsed time so resizing
//! the window or dropping frames never reshuffles the field.

use crate::animation::entity::ParticleFieldParams;
use crate::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Per-particle constants captured at mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    /// Unit direction of travel away from the origin.
    pub direction: Vec3,
    /// Distance travelled per second.
    pub speed: f32,
    /// Offset into the lifetime so particles do not respawn in lockstep.
    pub phase: f32,
    /// Size multiplier.
    pub size: f32,
}

/// Draws `params.count` seeds from a deterministic generator.
///
/// The same `seed` always yields the same field.
pub fn seed_particles(params: &ParticleFieldParams, seed: u64) -> Vec<ParticleSeed> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (min_speed, max_speed) = ordered(params.speed_range);
    let lifetime = params.lifetime.max(f32::EPSILON);

    (0..params.count)
        .map(|_| {
            let direction = if params.planar {
                let angle = rng.gen_range(0.0..TAU);
                Vec3::new(angle.cos(), angle.sin(), 0.0)
            } else {
                // Uniform on the unit sphere
                let z: f32 = rng.gen_range(-1.0..=1.0);
                let angle = rng.gen_range(0.0..TAU);
                let ring = (1.0 - z * z).max(0.0).sqrt();
                Vec3::new(ring * angle.cos(), ring * angle.sin(), z)
            };
            let speed = if max_speed > min_speed {
                rng.gen_range(min_speed..max_speed)
            } else {
                min_speed
            };
            ParticleSeed {
                direction,
                speed,
                phase: rng.gen_range(0.0..lifetime),
                size: rng.gen_range(0.5..1.0),
            }
        })
        .collect()
}

/// Time since the particle last respawned, in `[0, lifetime)`.
pub fn local_time(elapsed: f32, phase: f32, lifetime: f32) -> f32 {
    if lifetime <= 0.0 {
        return 0.0;
    }
    let local = (elapsed + phase).rem_euclid(lifetime);
    if local >= lifetime { 0.0 } else { local }
}

impl ParticleSeed {
    /// Position after `local` seconds on the particle's radial path.
    pub fn position_at(&self, params: &ParticleFieldParams, local: f32) -> Vec3 {
        params.origin + self.direction * (params.start_radius + self.speed * local)
    }
}

fn ordered((a, b): (f32, f32)) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
