//! Event handler module for Cyberfolio.
//!
//! Contains the App struct and its event handling logic.

use crate::app::app_state::AppState;
use crate::app::update::{adjacent_route, page_for_key, window_title};
use crate::config::BackdropConfig;
use crate::content::Catalog;
use crate::error::BackdropError;
use crate::scene::Route;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

/// Main application struct that manages the window lifecycle and event handling.
///
/// # Lifecycle
/// 1. Created with `App::new()` - initializes the WGPU instance
/// 2. `resumed` creates the window, surface and [`AppState`]
/// 3. Events are handled via `ApplicationHandler` trait methods
/// 4. Runs until the window is closed, `Esc`/`q` is pressed or the process is interrupted
///
/// On a project detail page the left and right arrows open the previous and next project.
pub struct App {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, None until initialized.
    pub state: Option<AppState>,
    /// The application window, None until set.
    pub window: Option<Arc<Window>>,
    config: BackdropConfig,
    catalog: &'static Catalog,
    start_route: Route,
    seed: u64,
    shutdown: Arc<AtomicBool>,
}

impl App {
    /// Creates a new [`App`] instance with default WGPU configuration.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration (window, scene tuning, asset directory)
    /// - `catalog`: Content catalog the start route was resolved against
    /// - `start_route`: Route mounted once the window exists
    /// - `seed`: Scene seed for every mount
    /// - `shutdown`: Set by the interrupt handler; checked between event batches
    pub fn new(
        config: BackdropConfig,
        catalog: &'static Catalog,
        start_route: Route,
        seed: u64,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            config,
            catalog,
            start_route,
            seed,
            shutdown,
        }
    }

    /// Creates the WGPU surface for `window` and initializes the application state.
    pub async fn set_window(&mut self, window: Window) -> Result<(), BackdropError> {
        let window = Arc::new(window);
        let size = window.inner_size();

        let surface = self
            .instance
            .create_surface(window.clone())
            .map_err(|err| BackdropError::Surface(format!("failed to create surface: {err}")))?;

        let state = AppState::new(
            &self.instance,
            surface,
            size.width,
            size.height,
            &self.config,
            self.catalog,
            self.start_route.clone(),
            self.seed,
        )
        .await?;

        window.request_redraw();
        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
        Ok(())
    }

    /// Handles window resize events. Zero-sized windows (minimized) are ignored.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        match &mut self.state {
            Some(state) => state.resize_surface(width, height),
            None => tracing::warn!("cannot resize surface before state is initialized"),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: &Key) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let target = match key {
            Key::Named(NamedKey::Escape) => {
                event_loop.exit();
                return;
            }
            Key::Character(text) if text.eq_ignore_ascii_case("q") => {
                event_loop.exit();
                return;
            }
            Key::Character(text) => page_for_key(text).map(Route::page),
            Key::Named(NamedKey::ArrowLeft) => adjacent_route(self.catalog, &state.route, false),
            Key::Named(NamedKey::ArrowRight) => adjacent_route(self.catalog, &state.route, true),
            _ => None,
        };
        let Some(route) = target else {
            return;
        };

        tracing::info!(%route, "navigating");
        state.navigate(route);
        if let Some(window) = self.window.as_ref() {
            window.set_title(&state.title(&self.config.window.title));
        }
    }
}

impl ApplicationHandler for App {
    /// Creates the window on first resume. Later resumes reuse it.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(window_title(
                &self.config.window.title,
                self.catalog,
                &self.start_route,
            ))
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                tracing::error!(%err, "failed to create window");
                event_loop.exit();
                return;
            }
        };
        if let Err(err) = pollster::block_on(self.set_window(window)) {
            tracing::error!(%err, "failed to initialize renderer");
            event_loop.exit();
        }
    }

    /// Handles window events: input, resize, visibility and redraw.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if self.state.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.handle_resized(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(state) = self.state.as_mut() {
                    state.handle_cursor(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(state) = self.state.as_mut() {
                    state.pointer.on_pointer_leave();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, &logical_key),
            WindowEvent::Occluded(occluded) => {
                if let Some(state) = self.state.as_mut() {
                    let now = Instant::now();
                    if occluded {
                        state.composer.pause(now);
                    } else {
                        state.composer.resume(now);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(state), Some(window)) = (self.state.as_mut(), self.window.as_ref()) {
                    state.handle_redraw(window);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown.load(Ordering::SeqCst) {
            tracing::info!("interrupt received, shutting down");
            if let Some(state) = self.state.as_mut() {
                state.composer.teardown();
            }
            event_loop.exit();
        }
    }
}
