//! Error types shared across the crate.

use crate::scene::PageKey;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration, content or scenes.
///
/// None of these are fatal to a running window: the host logs them and keeps
/// the page navigable with whatever could be mounted.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::BackdropConfig`].
    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The bundled content catalog failed to parse.
    #[error("Failed to parse content catalog: {0}")]
    ContentParse(String),

    /// More than one scene is bound to the same page.
    #[error("Conflicting scenes for page {page:?}: {scenes:?}")]
    SceneConflict {
        /// Page that matched more than once.
        page: PageKey,
        /// Names of every scene bound to the page.
        scenes: Vec<String>,
    },

    /// A path that is not one of the site's routes.
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// A project detail route whose slug is not in the catalog.
    #[error("Unknown project: {0}")]
    UnknownProject(String),

    /// A scene texture could not be decoded.
    #[error("Failed to load asset {path}: {reason}")]
    AssetLoad {
        /// Asset path on disk.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// The presentation surface could not provide a frame.
    #[error("Surface error: {0}")]
    Surface(String),
}
