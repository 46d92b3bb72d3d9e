//! User preferences read from `settings.toml`.
//!
//! Every field is optional; anything left out falls back to the defaults
//! below. A missing file is the normal case on first start.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Episodic";

pub const DEFAULT_VIDEO: &str = "1";
pub const DEFAULT_VOLUME_PERCENT: f64 = 100.0;
pub const DEFAULT_EPISODE_COUNT: u32 = 100;
pub const DEFAULT_BUCKET_SIZE: u32 = 20;
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 820.0];

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_video: Option<String>,
    /// Percent, 0..=100.
    #[serde(default)]
    pub initial_volume: Option<f64>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub episode_bucket_size: Option<u32>,
    #[serde(default)]
    pub window_size: Option<[f32; 2]>,
}

impl Config {
    pub fn default_video(&self) -> &str {
        self.default_video.as_deref().unwrap_or(DEFAULT_VIDEO)
    }

    pub fn initial_volume(&self) -> f64 {
        self.initial_volume
            .unwrap_or(DEFAULT_VOLUME_PERCENT)
            .clamp(0.0, 100.0)
    }

    pub fn episode_count(&self) -> u32 {
        self.episode_count.unwrap_or(DEFAULT_EPISODE_COUNT)
    }

    pub fn episode_bucket_size(&self) -> u32 {
        self.episode_bucket_size.unwrap_or(DEFAULT_BUCKET_SIZE).max(1)
    }

    pub fn window_size(&self) -> [f32; 2] {
        self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the user's settings, or defaults when there is no settings file.
pub fn load() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_partial_settings() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_video = \"3\"\ninitial_volume = 40.0\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.default_video(), "3");
        assert_eq!(config.initial_volume(), 40.0);
        assert_eq!(config.episode_count(), DEFAULT_EPISODE_COUNT);
        assert_eq!(config.episode_bucket_size(), DEFAULT_BUCKET_SIZE);
        assert_eq!(config.window_size(), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "episode_count = \"lots\"").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(crate::error::Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(matches!(
            load_from_path(&dir.path().join("nope.toml")),
            Err(crate::error::Error::Io(_))
        ));
    }

    #[test]
    fn test_values_are_sanitised() {
        let config = Config {
            initial_volume: Some(180.0),
            episode_bucket_size: Some(0),
            ..Config::default()
        };
        assert_eq!(config.initial_volume(), 100.0);
        assert_eq!(config.episode_bucket_size(), 1);
        assert_eq!(config.default_video(), DEFAULT_VIDEO);
    }
}
