//! Application module for Cyberfolio.
//!
//! This module hosts the backdrops in a native window. It owns the renderer, the
//! scene registry, the composer and the pointer adapter, and routes `winit`
//! events between them.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds the running session
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`update`]: Page switching and the per-frame redraw
//!
//! # Event Flow
//!
//! 1. **Input Events**: cursor and keyboard events update the pointer adapter or switch page
//! 2. **Frame**: each redraw ticks the composer with the pointer snapshot
//! 3. **Rendering**: the resulting draw list is submitted to the GPU
//!
//! Everything runs on the event loop thread; the pointer state has a single writer.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
