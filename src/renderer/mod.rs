//! Main renderer module.
//!
//! Draw lists are rendered as instanced, alpha-blended quads: one pipeline, one
//! shared quad and one instance per entity transform.

/// Per-frame uniform buffer.
pub mod uniform;
/// Quad vertex and sprite instance layouts.
pub mod vertex;
/// Instanced sprite pipeline and draw-list projection.
pub mod sprite;
/// Texture loading with placeholder fallback.
pub mod texture;
/// Surface, device and frame submission.
pub mod wgpu_lib;

pub use wgpu_lib::WgpuRenderer;
