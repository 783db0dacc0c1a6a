//! Cyberfolio - animated backdrops for a SOC analyst portfolio.
//!
//! This crate renders the decorative backgrounds of a single-page portfolio/CV site
//! (rotating globe, cyber map, scan lines, pulsing nodes, tilt-on-hover profile card)
//! and carries the static content the pages display.
//!
//! # Architecture
//! The crate is split along the frame pipeline:
//! - `scene/`: page keys, scene descriptors and the registry mapping pages to scenes
//! - `animation/`: frame clock, easing, springs and per-entity update functions
//! - `compose/`: the composer that owns a mounted scene and builds draw lists
//! - `input/`: the pointer adapter, sole writer of [`input::PointerState`]
//! - `content/`: analyst profile, project catalog and contact form validation
//! - `renderer/` and `app/`: the `wgpu`/`winit` host that draws each frame
//! - `math/`: vector and matrix helpers shared by animation and rendering
//!
//! # Frame Flow
//! 1. The route resolves to a [`scene::PageKey`] and the registry selects its scene
//! 2. The composer mounts the scene and starts a fresh frame clock
//! 3. Every redraw ticks the clock and updates each entity from elapsed time and pointer
//! 4. The draw list is issued back-to-front by layer

pub mod animation;
pub mod app;
pub mod compose;
pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod math;
pub mod renderer;
pub mod scene;

pub use error::BackdropError;
