//! AppState module for Cyberfolio.
//!
//! This module defines the [`AppState`] struct, which holds all state required for a running
//! session: the GPU renderer, the scene registry, the composer and the pointer adapter.

use crate::app::update::{switch_scene, window_title};
use crate::compose::Composer;
use crate::config::BackdropConfig;
use crate::content::Catalog;
use crate::error::BackdropError;
use crate::input::{ContainerBounds, PointerInputAdapter};
use crate::renderer::wgpu_lib::WgpuRenderer;
use crate::scene::{Route, SceneRegistry};
use std::time::Instant;

/// Holds all state required for a running Cyberfolio session.
pub struct AppState {
    /// The WGPU renderer for every backdrop.
    pub wgpu_renderer: WgpuRenderer,
    /// Owns the mounted scene and its clock.
    pub composer: Composer,
    /// Page to scene bindings, read-only after startup.
    pub registry: SceneRegistry,
    /// Sole writer of the pointer state the composer reads.
    pub pointer: PointerInputAdapter,
    /// Profile and projects shown alongside the backdrops.
    pub catalog: &'static Catalog,
    /// Where the user is, even when the page has no backdrop.
    pub route: Route,
    /// Scene seed handed to every mount.
    pub seed: u64,
}

impl AppState {
    /// Asynchronously creates a new [`AppState`] and mounts the scene for `route`.
    ///
    /// # Arguments
    /// - `instance`: The WGPU instance.
    /// - `surface`: The WGPU surface for rendering.
    /// - `width`, `height`: Initial surface size in physical pixels.
    /// - `config`: Loaded configuration.
    /// - `catalog`: Content catalog, already checked against `route`.
    /// - `route`: Location shown at startup.
    /// - `seed`: Scene seed (the CLI may override the configured one).
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        config: &BackdropConfig,
        catalog: &'static Catalog,
        route: Route,
        seed: u64,
    ) -> Result<Self, BackdropError> {
        let wgpu_renderer =
            WgpuRenderer::new(instance, surface, width, height, config.assets.dir.clone()).await?;
        let registry = SceneRegistry::portfolio_defaults(&config.tuning());
        tracing::info!(scenes = registry.len(), "scene registry built");

        let mut state = Self {
            wgpu_renderer,
            composer: Composer::new(),
            registry,
            pointer: PointerInputAdapter::new(),
            catalog,
            route: route.clone(),
            seed,
        };
        state.navigate(route);
        Ok(state)
    }

    /// Switches to `route`, tearing down the current scene first.
    ///
    /// The new scene's textures are uploaded before it is mounted, so its clock
    /// starts once they are ready.
    pub fn navigate(&mut self, route: Route) {
        let page = route.page;
        self.route = route;
        self.pointer.on_pointer_leave();
        if let Ok(Some(scene)) = self.registry.select_scene(page) {
            self.wgpu_renderer.preload_textures(scene.texture_keys());
        }
        if let Err(err) =
            switch_scene(&mut self.composer, &self.registry, page, Instant::now(), self.seed)
        {
            tracing::error!(%err, %page, "scene selection failed, nothing mounted");
        }
    }

    /// Window title for the current route.
    pub fn title(&self, base: &str) -> String {
        window_title(base, self.catalog, &self.route)
    }

    /// Updates the surface configuration to match the window.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }

    /// Feeds a window-space cursor position to the pointer adapter.
    ///
    /// Scenes without a pointer region ignore the cursor entirely.
    pub fn handle_cursor(&mut self, x: f32, y: f32) {
        match self.container_bounds() {
            Some(bounds) => self.pointer.on_cursor(x, y, &bounds),
            None => self.pointer.on_pointer_leave(),
        }
    }

    /// Bounds of the mounted scene's pointer region in physical pixels.
    pub fn container_bounds(&self) -> Option<ContainerBounds> {
        let region = self.composer.pointer_region()?;
        let config = &self.wgpu_renderer.surface_config;
        Some(ContainerBounds::from_viewport_rect(
            (config.width, config.height),
            region,
        ))
    }
}
