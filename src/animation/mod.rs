//! Time-driven animation primitives.
//!
//! - [`clock`]: the per-scene frame clock
//! - [`easing`]: timing curves and looping keyframe helpers
//! - [`spring`]: closed-form damped spring for pointer smoothing
//! - [`particles`]: seeded particle trajectories
//! - [`entity`]: entity descriptors and [`entity::update_entity`]

pub mod clock;
pub mod easing;
pub mod entity;
pub mod particles;
pub mod spring;

pub use clock::FrameClock;
pub use easing::{Easing, Keyframes};
pub use entity::{
    Appearance, EntityDescriptor, EntityFrame, EntityKind, EntityRuntimeState, FrameContext, Rgba,
    Shape, Space, Transform, update_entity,
};
pub use spring::{SpringConfig, SpringState};
