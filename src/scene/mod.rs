//! Pages, scene descriptors and the registry that binds them.
//!
//! A scene is the immutable list of entities a page's backdrop animates. The
//! [`SceneRegistry`] resolves a [`PageKey`] to at most one scene; the built-in
//! scenes for each page live in [`presets`].

pub mod presets;
pub mod registry;

pub use presets::SceneTuning;
pub use registry::SceneRegistry;

use crate::animation::{EntityDescriptor, EntityKind, Space};
use std::fmt;
use std::str::FromStr;

/// The site pages a backdrop can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKey {
    Home,
    Portfolio,
    ProjectDetail,
    About,
    Contact,
}

impl PageKey {
    /// Pages in keyboard order (`1`..`4`). Project detail pages are reached by route only.
    pub const NAVIGABLE: [PageKey; 4] = [
        PageKey::Home,
        PageKey::Portfolio,
        PageKey::About,
        PageKey::Contact,
    ];

    /// Resolves a site route.
    ///
    /// # Arguments
    /// * `route` - Path such as `/`, `/portfolio` or `/portfolio/home-soc-lab`
    ///
    /// # Returns
    /// `None` for routes that are not part of the site.
    pub fn from_route(route: &str) -> Option<PageKey> {
        let path = route.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(PageKey::Home);
        }
        let mut segments = trimmed.split('/');

        match (segments.next(), segments.next(), segments.next()) {
            (Some("portfolio"), None, _) => Some(PageKey::Portfolio),
            (Some("portfolio"), Some(slug), None) if !slug.is_empty() => Some(PageKey::ProjectDetail),
            (Some("about"), None, _) => Some(PageKey::About),
            (Some("contact"), None, _) => Some(PageKey::Contact),
            _ => None,
        }
    }

    /// Lowercase name used on the command line and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PageKey::Home => "home",
            PageKey::Portfolio => "portfolio",
            PageKey::ProjectDetail => "project-detail",
            PageKey::About => "about",
            PageKey::Contact => "contact",
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(PageKey::Home),
            "portfolio" => Ok(PageKey::Portfolio),
            "project-detail" => Ok(PageKey::ProjectDetail),
            "about" => Ok(PageKey::About),
            "contact" => Ok(PageKey::Contact),
            other => Err(format!("unknown page '{other}'")),
        }
    }
}

/// A site location: the page, plus the project slug on detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub page: PageKey,
    pub project: Option<String>,
}

impl Route {
    pub fn page(page: PageKey) -> Self {
        Self {
            page,
            project: None,
        }
    }

    pub fn project(slug: impl Into<String>) -> Self {
        Self {
            page: PageKey::ProjectDetail,
            project: Some(slug.into()),
        }
    }

    /// Like [`PageKey::from_route`], keeping the slug of project detail routes.
    /// The slug is not checked against the catalog here.
    pub fn parse(route: &str) -> Option<Route> {
        let page = PageKey::from_route(route)?;
        if page != PageKey::ProjectDetail {
            return Some(Route::page(page));
        }
        let path = route.split(['?', '#']).next().unwrap_or_default();
        let slug = path.trim_matches('/').rsplit('/').next()?;
        Some(Route::project(slug))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.page, self.project.as_deref()) {
            (PageKey::Home, _) => f.write_str("/"),
            (PageKey::ProjectDetail, Some(slug)) => write!(f, "/portfolio/{slug}"),
            (PageKey::ProjectDetail, None) => f.write_str("/portfolio"),
            (page, _) => write!(f, "/{page}"),
        }
    }
}

/// Ordered entity list bound to one page.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescriptor {
    pub page: PageKey,
    pub name: String,
    /// Declaration order is the tie-breaker for entities on the same layer.
    pub entities: Vec<EntityDescriptor>,
}

impl SceneDescriptor {
    /// Viewport rectangle `[left, top, width, height]` of the first screen-space
    /// tilt card, which is where pointer movement is tracked.
    pub fn pointer_region(&self) -> Option<[f32; 4]> {
        self.entities.iter().find_map(|entity| match &entity.kind {
            EntityKind::TiltCard(params) if entity.appearance.space == Space::Screen => {
                let [w, h] = entity.appearance.size;
                Some([params.center.x() - w / 2.0, params.center.y() - h / 2.0, w, h])
            }
            _ => None,
        })
    }

    /// Texture keys the scene draws with, in first-use order without repeats.
    pub fn texture_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.entities.iter().filter_map(|e| e.appearance.texture.as_deref()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(PageKey::from_route("/"), Some(PageKey::Home));
        assert_eq!(PageKey::from_route(""), Some(PageKey::Home));
        assert_eq!(PageKey::from_route("/portfolio"), Some(PageKey::Portfolio));
        assert_eq!(PageKey::from_route("/portfolio/"), Some(PageKey::Portfolio));
        assert_eq!(
            PageKey::from_route("/portfolio/home-soc-lab"),
            Some(PageKey::ProjectDetail)
        );
        assert_eq!(PageKey::from_route("/about?tab=cv"), Some(PageKey::About));
        assert_eq!(PageKey::from_route("/contact#form"), Some(PageKey::Contact));
        assert_eq!(PageKey::from_route("/portfolio/a/b"), None);
        assert_eq!(PageKey::from_route("/blog"), None);
    }

    #[test]
    fn test_texture_keys_are_deduplicated() {
        let mut scene = presets::home_globe(&SceneTuning::default());
        assert_eq!(scene.texture_keys(), vec!["earth", "clouds"]);
        let earth = scene.entities.iter().find(|e| e.label == "earth").cloned().unwrap();
        scene.entities.push(earth);
        assert_eq!(scene.texture_keys(), vec!["earth", "clouds"]);
        assert!(presets::project_detail(&SceneTuning::default()).texture_keys().is_empty());
    }

    #[test]
    fn test_route_keeps_project_slug() {
        assert_eq!(
            Route::parse("/portfolio/home-soc-lab?img=2"),
            Some(Route::project("home-soc-lab"))
        );
        assert_eq!(Route::parse("/about/"), Some(Route::page(PageKey::About)));
        assert_eq!(Route::parse("/blog"), None);
        assert_eq!(Route::project("home-soc-lab").to_string(), "/portfolio/home-soc-lab");
        assert_eq!(Route::page(PageKey::Home).to_string(), "/");
        assert_eq!(Route::page(PageKey::Contact).to_string(), "/contact");
    }

    #[test]
    fn test_names_round_trip() {
        for page in PageKey::NAVIGABLE {
            assert_eq!(page.name().parse::<PageKey>(), Ok(page));
        }
        assert!("gallery".parse::<PageKey>().is_err());
    }
}
