//! Pointer input.
//!
//! [`PointerInputAdapter`] is the only writer of [`PointerState`]; entities read
//! snapshots of it through the frame context.

pub mod pointer;

pub use pointer::{ContainerBounds, PointerInputAdapter, PointerState};
