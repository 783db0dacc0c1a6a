//! Portfolio projects and the queries the pages run against them.

use crate::content::Catalog;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    ThreatHunting,
    IncidentResponse,
    Siem,
    MalwareAnalysis,
    NetworkSecurity,
    Labs,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 6] = [
        ProjectCategory::ThreatHunting,
        ProjectCategory::IncidentResponse,
        ProjectCategory::Siem,
        ProjectCategory::MalwareAnalysis,
        ProjectCategory::NetworkSecurity,
        ProjectCategory::Labs,
    ];

    /// Filter key used in page URLs.
    pub fn key(&self) -> &'static str {
        match self {
            ProjectCategory::ThreatHunting => "threat-hunting",
            ProjectCategory::IncidentResponse => "incident-response",
            ProjectCategory::Siem => "siem",
            ProjectCategory::MalwareAnalysis => "malware-analysis",
            ProjectCategory::NetworkSecurity => "network-security",
            ProjectCategory::Labs => "labs",
        }
    }

    pub fn from_key(key: &str) -> Option<ProjectCategory> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Portrait,
    Landscape,
    Square,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectImage {
    pub id: String,
    pub src: String,
    pub alt: String,
    pub aspect_ratio: AspectRatio,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub category: ProjectCategory,
    pub year: String,
    pub cover_image: String,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    pub description: String,
    pub tools: Option<String>,
    pub platform: Option<String>,
    pub location: Option<String>,
}

/// Neighbours of a project in catalog order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentProjects<'a> {
    pub prev: Option<&'a Project>,
    pub next: Option<&'a Project>,
}

impl Catalog {
    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }

    /// Projects in a category, by filter key. `"all"` returns every project and
    /// an unknown key returns none.
    pub fn projects_by_category(&self, filter: &str) -> Vec<&Project> {
        if filter == "all" {
            return self.projects.iter().collect();
        }
        match ProjectCategory::from_key(filter) {
            Some(category) => self
                .projects
                .iter()
                .filter(|project| project.category == category)
                .collect(),
            None => Vec::new(),
        }
    }

    /// The first four projects.
    pub fn featured_projects(&self) -> &[Project] {
        &self.projects[..self.projects.len().min(4)]
    }

    /// Previous and next projects around `slug`. Both are `None` for an unknown slug.
    pub fn adjacent_projects(&self, slug: &str) -> AdjacentProjects<'_> {
        let Some(index) = self.projects.iter().position(|project| project.slug == slug) else {
            return AdjacentProjects {
                prev: None,
                next: None,
            };
        };
        AdjacentProjects {
            prev: index.checked_sub(1).and_then(|i| self.projects.get(i)),
            next: self.projects.get(index + 1),
        }
    }
}
