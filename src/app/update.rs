//! Page switching and the per-frame redraw.

use crate::app::app_state::AppState;
use crate::compose::Composer;
use crate::content::Catalog;
use crate::error::BackdropError;
use crate::scene::{PageKey, Route, SceneRegistry};
use std::time::Instant;
use winit::window::Window;

/// Tears down the mounted scene and mounts the one bound to `page`.
///
/// Returns whether a scene was mounted. Pages without a backdrop leave the
/// composer empty; a conflicting registration does too, and is returned as an error.
pub fn switch_scene(
    composer: &mut Composer,
    registry: &SceneRegistry,
    page: PageKey,
    now: Instant,
    seed: u64,
) -> Result<bool, BackdropError> {
    composer.teardown();
    match registry.select_scene(page)? {
        Some(scene) => {
            composer.mount(scene, now, seed);
            Ok(true)
        }
        None => {
            tracing::debug!(%page, "page has no backdrop");
            Ok(false)
        }
    }
}

/// Maps the number row to the navigable pages (`1` home through `4` contact).
pub fn page_for_key(key: &str) -> Option<PageKey> {
    let index: usize = key.parse().ok()?;
    index
        .checked_sub(1)
        .and_then(|i| PageKey::NAVIGABLE.get(i).copied())
}

/// The configured title followed by the open project's title, or the analyst's
/// name on every other page.
pub fn window_title(base: &str, catalog: &Catalog, route: &Route) -> String {
    let subject = route
        .project
        .as_deref()
        .and_then(|slug| catalog.project_by_slug(slug))
        .map_or(catalog.profile.name.as_str(), |project| project.title.as_str());
    format!("{base} | {subject}")
}

/// The previous or next project from a project detail route. `None` at either
/// end of the catalog and on every other page.
pub fn adjacent_route(catalog: &Catalog, route: &Route, forward: bool) -> Option<Route> {
    let adjacent = catalog.adjacent_projects(route.project.as_deref()?);
    let project = if forward { adjacent.next } else { adjacent.prev }?;
    Some(Route::project(project.slug.as_str()))
}

impl AppState {
    /// Advances the mounted scene, renders it and schedules the next redraw.
    pub fn handle_redraw(&mut self, window: &Window) {
        let list = self.composer.frame(Instant::now(), self.pointer.snapshot());
        if let Err(err) = self.wgpu_renderer.render(list.as_ref()) {
            tracing::error!(%err, "frame render failed");
        }
        window.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneTuning;
    use crate::scene::presets;

    fn catalog() -> &'static Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_window_title_names_project_or_analyst() {
        let catalog = catalog();
        let project = &catalog.projects[1];
        assert_eq!(
            window_title("Cyberfolio", catalog, &Route::project(project.slug.as_str())),
            format!("Cyberfolio | {}", project.title)
        );
        assert_eq!(
            window_title("Cyberfolio", catalog, &Route::page(PageKey::About)),
            "Cyberfolio | Alex Chen"
        );
    }

    #[test]
    fn test_adjacent_route_steps_through_catalog() {
        let catalog = catalog();
        let first = Route::project(catalog.projects[0].slug.as_str());
        let second = Route::project(catalog.projects[1].slug.as_str());

        assert_eq!(adjacent_route(catalog, &first, true), Some(second.clone()));
        assert_eq!(adjacent_route(catalog, &second, false), Some(first.clone()));
        assert_eq!(adjacent_route(catalog, &first, false), None);
        assert_eq!(adjacent_route(catalog, &Route::page(PageKey::Portfolio), true), None);
    }

    #[test]
    fn test_page_for_key() {
        assert_eq!(page_for_key("1"), Some(PageKey::Home));
        assert_eq!(page_for_key("2"), Some(PageKey::Portfolio));
        assert_eq!(page_for_key("3"), Some(PageKey::About));
        assert_eq!(page_for_key("4"), Some(PageKey::Contact));
        assert_eq!(page_for_key("0"), None);
        assert_eq!(page_for_key("5"), None);
        assert_eq!(page_for_key("q"), None);
    }

    #[test]
    fn test_switch_replaces_mounted_scene() {
        let registry = SceneRegistry::portfolio_defaults(&SceneTuning::default());
        let mut composer = Composer::new();
        let now = Instant::now();

        assert!(switch_scene(&mut composer, &registry, PageKey::Home, now, 1).unwrap());
        assert_eq!(composer.mounted_page(), Some(PageKey::Home));

        assert!(switch_scene(&mut composer, &registry, PageKey::Contact, now, 1).unwrap());
        assert_eq!(composer.mounted_page(), Some(PageKey::Contact));
    }

    #[test]
    fn test_switch_to_page_without_backdrop_unmounts() {
        let mut registry = SceneRegistry::new();
        registry.register(presets::about_backdrop(&SceneTuning::default()));
        let mut composer = Composer::new();
        let now = Instant::now();

        switch_scene(&mut composer, &registry, PageKey::About, now, 1).unwrap();
        assert!(!switch_scene(&mut composer, &registry, PageKey::Home, now, 1).unwrap());
        assert_eq!(composer.mounted_page(), None);
    }

    #[test]
    fn test_project_detail_mounts_site_grid() {
        let registry = SceneRegistry::portfolio_defaults(&SceneTuning::default());
        let mut composer = Composer::new();

        assert!(
            switch_scene(&mut composer, &registry, PageKey::ProjectDetail, Instant::now(), 1)
                .unwrap()
        );
        assert_eq!(composer.mounted_scene_name(), Some("site-grid"));
    }

    #[test]
    fn test_conflict_leaves_nothing_mounted() {
        let tuning = SceneTuning::default();
        let mut registry = SceneRegistry::portfolio_defaults(&tuning);
        registry.register(presets::home_globe(&tuning));
        let mut composer = Composer::new();
        let now = Instant::now();

        switch_scene(&mut composer, &registry, PageKey::Contact, now, 1).unwrap();
        let err = switch_scene(&mut composer, &registry, PageKey::Home, now, 1).unwrap_err();
        assert!(matches!(err, BackdropError::SceneConflict { page: PageKey::Home, .. }));
        assert_eq!(composer.mounted_page(), None);
    }
}
