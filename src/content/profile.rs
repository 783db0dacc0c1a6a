//! The analyst's profile.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalystProfile {
    pub name: String,
    pub tagline: String,
    pub hero_introduction: String,
    pub biography: String,
    pub approach: String,
    pub certifications: Vec<String>,
    pub skills: Vec<String>,
    pub education: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub availability: String,
    #[serde(default)]
    pub social_links: SocialLinks,
    pub portrait_image: String,
    pub cv: CvAsset,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub tryhackme: Option<String>,
}

/// Downloadable CV: where it is served from and the name it is saved under.
#[derive(Debug, Clone, Deserialize)]
pub struct CvAsset {
    pub href: String,
    pub file_name: String,
}

impl AnalystProfile {
    /// Biography split into paragraphs.
    pub fn biography_paragraphs(&self) -> impl Iterator<Item = &str> {
        paragraphs(&self.biography)
    }

    pub fn approach_paragraphs(&self) -> impl Iterator<Item = &str> {
        paragraphs(&self.approach)
    }
}

fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use crate::content::Catalog;

    #[test]
    fn test_profile_fields() {
        let profile = &Catalog::embedded().unwrap().profile;
        assert_eq!(profile.biography_paragraphs().count(), 3);
        assert_eq!(profile.approach_paragraphs().count(), 2);
        assert_eq!(profile.cv.file_name, "Alex_Chen_CV.pdf");
        assert!(profile.cv.href.ends_with(&profile.cv.file_name));
        assert!(profile.social_links.tryhackme.is_some());
    }
}
