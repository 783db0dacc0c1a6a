//! Static page content: the analyst profile, the project catalog and the
//! contact form.
//!
//! The catalog is bundled into the binary as TOML and parsed once on first use.

pub mod contact;
pub mod profile;
pub mod projects;

pub use contact::{
    ContactError, ContactForm, ContactSink, ContactSubmission, InquiryType, LogSink, Notification,
    NotificationKind, submit,
};
pub use profile::{AnalystProfile, CvAsset, SocialLinks};
pub use projects::{AdjacentProjects, AspectRatio, Project, ProjectCategory, ProjectImage};

use crate::error::BackdropError;
use crate::scene::Route;
use lazy_static::lazy_static;
use serde::Deserialize;

const EMBEDDED_CATALOG: &str = include_str!("../../assets/content/portfolio.toml");

lazy_static! {
    static ref EMBEDDED: Result<Catalog, String> =
        Catalog::from_toml(EMBEDDED_CATALOG).map_err(|err| err.to_string());
}

/// Everything the pages display besides the backdrops.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub profile: AnalystProfile,
    /// Display order; the first four are featured on the home page.
    pub projects: Vec<Project>,
}

impl Catalog {
    /// The catalog bundled with the crate.
    pub fn embedded() -> Result<&'static Catalog, BackdropError> {
        EMBEDDED
            .as_ref()
            .map_err(|reason| BackdropError::ContentParse(reason.clone()))
    }

    /// Parses a catalog document.
    pub fn from_toml(source: &str) -> Result<Catalog, BackdropError> {
        let catalog: Catalog =
            toml::from_str(source).map_err(|err| BackdropError::ContentParse(err.to_string()))?;
        tracing::debug!(projects = catalog.projects.len(), "content catalog parsed");
        Ok(catalog)
    }

    /// Parses `route` and checks that a project slug names a catalog entry.
    ///
    /// # Errors
    /// [`BackdropError::UnknownRoute`] for paths outside the site and
    /// [`BackdropError::UnknownProject`] for slugs the catalog does not list.
    pub fn resolve_route(&self, route: &str) -> Result<Route, BackdropError> {
        let resolved =
            Route::parse(route).ok_or_else(|| BackdropError::UnknownRoute(route.to_string()))?;
        if let Some(slug) = resolved.project.as_deref() {
            if self.project_by_slug(slug).is_none() {
                return Err(BackdropError::UnknownProject(slug.to_string()));
            }
        }
        Ok(resolved)
    }

    /// Footer line, e.g. `© 2024 Alex Chen. All rights reserved.`
    pub fn copyright_line(&self, year: i32) -> String {
        format!("© {year} {}. All rights reserved.", self.profile.name)
    }
}

/// The current calendar year in UTC.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.projects.len(), 8);
        assert_eq!(catalog.profile.name, "Alex Chen");
        assert_eq!(catalog.profile.certifications.len(), 4);
        assert!(catalog.profile.biography.starts_with("I'm an aspiring SOC Analyst"));
    }

    #[test]
    fn test_copyright_line() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(
            catalog.copyright_line(2024),
            "© 2024 Alex Chen. All rights reserved."
        );
    }

    #[test]
    fn test_resolve_route_checks_slug() {
        let catalog = Catalog::embedded().unwrap();
        let slug = catalog.projects[0].slug.clone();
        let route = catalog.resolve_route(&format!("/portfolio/{slug}")).unwrap();
        assert_eq!(route, Route::project(slug));
        assert_eq!(
            catalog.resolve_route("/contact").unwrap(),
            Route::page(crate::scene::PageKey::Contact)
        );
        assert!(matches!(
            catalog.resolve_route("/portfolio/not-a-project"),
            Err(BackdropError::UnknownProject(slug)) if slug == "not-a-project"
        ));
        assert!(matches!(
            catalog.resolve_route("/blog"),
            Err(BackdropError::UnknownRoute(_))
        ));
    }

    #[test]
    fn test_malformed_catalog_is_content_error() {
        let err = Catalog::from_toml("[profile]\nname = 3").unwrap_err();
        assert!(matches!(err, BackdropError::ContentParse(_)));
    }
}
