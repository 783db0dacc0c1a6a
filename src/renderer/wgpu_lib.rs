//! WGPU-based renderer for the backdrops.
//!
//! This module provides [`WgpuRenderer`], which owns the surface, device and
//! queue and draws each frame's [`DrawList`] through the sprite pipeline.
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`] and call
//! [`WgpuRenderer::render`] on every redraw with the composer's output.

use crate::compose::DrawList;
use crate::error::BackdropError;
use crate::math::mat::BackdropCamera;
use crate::renderer::sprite::SpriteRenderer;
use crate::renderer::texture::TextureCache;
use std::path::PathBuf;

/// Near-black navy the site uses behind every backdrop.
const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.008,
    g: 0.012,
    b: 0.03,
    a: 1.0,
};

/// Main WGPU renderer.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    /// Camera the world-space entities are projected with; its aspect follows the surface.
    pub camera: BackdropCamera,
    pub sprites: SpriteRenderer,
}

impl WgpuRenderer {
    /// Initializes a new [`WgpuRenderer`] and all associated GPU resources.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        asset_dir: PathBuf,
    ) -> Result<Self, BackdropError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;

        surface.configure(&device, &surface_config);
        tracing::info!(
            adapter = %adapter.get_info().name,
            format = ?surface_config.format,
            width,
            height,
            "surface configured"
        );

        let textures = TextureCache::new(&device, &queue, asset_dir);
        let sprites = SpriteRenderer::new(&device, &surface_config, textures);
        let camera = BackdropCamera {
            aspect: aspect_ratio(width, height),
            ..BackdropCamera::default()
        };

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            camera,
            sprites,
        })
    }

    /// Loads every texture in `keys` ahead of the first frame that draws it.
    pub fn preload_textures<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.sprites.textures.ensure(&self.device, &self.queue, key);
        }
    }

    /// Reconfigures the surface for a new size. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.camera.aspect = aspect_ratio(width, height);
    }

    /// Draws `list` (or just the background when nothing is mounted) and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, list: Option<&DrawList>) -> Result<(), BackdropError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                tracing::debug!("surface outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(err) => return Err(BackdropError::Surface(err.to_string())),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        match list {
            Some(list) => self
                .sprites
                .prepare(&self.device, &self.queue, list, &self.camera),
            None => self.sprites.clear(),
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.sprites.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    // Private helper methods

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, BackdropError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or_else(|| BackdropError::Surface("no compatible graphics adapter".to_string()))
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), BackdropError> {
        adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|err| BackdropError::Surface(format!("failed to create device: {err}")))
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, BackdropError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or_else(|| BackdropError::Surface("surface reports no formats".to_string()))?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
