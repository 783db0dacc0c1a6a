//! Configuration loading and defaults

use crate::error::BackdropError;
use crate::scene::SceneTuning;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "cyberfolio.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackdropConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub scene: SceneConfig,

    #[serde(default)]
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial inner width in logical pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Initial inner height in logical pixels
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Seed for particle fields; the same seed gives the same starfield
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_star_count")]
    pub star_count: usize,

    /// Profile card tilt limit in degrees
    #[serde(default = "default_max_tilt")]
    pub max_tilt_degrees: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory holding `<texture key>.png|jpg|webp`
    #[serde(default = "default_asset_dir")]
    pub dir: PathBuf,
}

// Default value functions
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}
fn default_title() -> String {
    "Cyberfolio".to_string()
}
fn default_seed() -> u64 {
    0x5EC0_A11E
}
fn default_star_count() -> usize {
    1500
}
fn default_max_tilt() -> f32 {
    15.0
}
fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets/textures")
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            star_count: default_star_count(),
            max_tilt_degrees: default_max_tilt(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: default_asset_dir(),
        }
    }
}

impl BackdropConfig {
    /// Load configuration from file or use defaults.
    ///
    /// Without an explicit path, `cyberfolio.toml` in the working directory is
    /// used when present. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, BackdropError> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| BackdropError::ConfigRead {
                path: config_path.clone(),
                source,
            })?;
        let config = Self::from_toml(&contents).map_err(|source| BackdropError::ConfigParse {
            path: config_path.clone(),
            source,
        })?;
        tracing::info!(path = %config_path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Scene parameters derived from the config.
    pub fn tuning(&self) -> SceneTuning {
        SceneTuning {
            star_count: self.scene.star_count,
            max_tilt_degrees: self.scene.max_tilt_degrees.clamp(0.0, 45.0),
        }
    }
}
