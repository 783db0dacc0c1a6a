//! Math utilities and types for animation and rendering.
//!
//! This module provides matrix and vector types and operations, as well as
//! helper functions for angles and interpolation. The vector and matrix types
//! are designed to be compatible with GPU memory layouts (WGSL `vec3`/`mat4x4`).
//!
//! # Module Organization
//!
//! - [`vec`] module contains vector operations
//! - [`mat`] module contains matrix operations and the backdrop camera projection
//! - Angle and interpolation helpers are provided at root level

pub mod mat;
pub mod vec;

pub use mat::Mat4;
pub use vec::Vec3;

use std::f32::consts::TAU;

/// Converts degrees to radians.
///
/// Unlike [`wrap_angle`], no wrapping is applied: `-15°` stays negative so tilt
/// limits keep their sign.
///
/// # Example
/// ```
/// use cyberfolio::math::deg_to_rad;
///
/// assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
/// assert!(deg_to_rad(-15.0) < 0.0);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Wraps an angle in radians into `[0, 2π)`.
///
/// Non-finite input maps to `0.0`.
///
/// # Example
/// ```
/// use cyberfolio::math::wrap_angle;
///
/// let wrapped = wrap_angle(3.0 * std::f32::consts::PI);
/// assert!((wrapped - std::f32::consts::PI).abs() < 1e-5);
/// assert!(wrap_angle(-0.5) > 0.0);
/// ```
pub fn wrap_angle(radians: f32) -> f32 {
    if !radians.is_finite() {
        return 0.0;
    }
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Replaces NaN and infinities with `fallback`.
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
