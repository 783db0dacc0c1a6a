//! Page to scene bindings.

use crate::error::BackdropError;
use crate::scene::presets::{self, SceneTuning};
use crate::scene::{PageKey, SceneDescriptor};

/// Every scene known to the host. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's backdrops: globe on home, cyber map on portfolio, the about
    /// backdrop with the profile card, the contact beam, and the bare site grid
    /// on project detail pages.
    pub fn portfolio_defaults(tuning: &SceneTuning) -> Self {
        let mut registry = Self::new();
        registry.register(presets::home_globe(tuning));
        registry.register(presets::portfolio_cyber_map(tuning));
        registry.register(presets::about_backdrop(tuning));
        registry.register(presets::contact_backdrop(tuning));
        registry.register(presets::project_detail(tuning));
        registry
    }

    /// Adds a scene. Registering two scenes for one page is not rejected here;
    /// [`SceneRegistry::select_scene`] reports it.
    pub fn register(&mut self, scene: SceneDescriptor) {
        tracing::debug!(
            page = %scene.page,
            scene = %scene.name,
            entities = scene.entities.len(),
            "scene registered"
        );
        self.scenes.push(scene);
    }

    /// The scene bound to `page`, or `None` when the page has no backdrop.
    ///
    /// # Errors
    /// [`BackdropError::SceneConflict`] when more than one scene matches.
    pub fn select_scene(&self, page: PageKey) -> Result<Option<&SceneDescriptor>, BackdropError> {
        let mut matches = self.scenes.iter().filter(|scene| scene.page == page);
        let Some(first) = matches.next() else {
            return Ok(None);
        };
        let rest: Vec<&SceneDescriptor> = matches.collect();
        if rest.is_empty() {
            return Ok(Some(first));
        }

        let scenes = std::iter::once(first)
            .chain(rest)
            .map(|scene| scene.name.clone())
            .collect();
        Err(BackdropError::SceneConflict { page, scenes })
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
