//! Scene composition: one mounted scene, one clock, one draw list per frame.

pub mod composer;

pub use composer::{Composer, DrawCommand, DrawList, EntityId};
