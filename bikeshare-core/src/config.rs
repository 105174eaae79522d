use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::feed::DEFAULT_FEED_URL;
use crate::model::Coordinate;

/// A saved user location, e.g. home or office.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<SavedLocation> for Coordinate {
    fn from(loc: SavedLocation) -> Self {
        Coordinate::new(loc.latitude, loc.longitude)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Feed URL override; the public Citi Bike feed when absent.
    pub feed_url: Option<String>,

    /// Example TOML:
    /// [home]
    /// latitude = 40.7
    /// longitude = -74.0
    pub home: Option<SavedLocation>,
}

impl Config {
    /// Effective feed URL, falling back to the public feed.
    pub fn feed_url(&self) -> &str {
        self.feed_url.as_deref().unwrap_or(DEFAULT_FEED_URL)
    }

    /// The saved home coordinate, if one has been configured.
    pub fn home_coordinate(&self) -> Option<Coordinate> {
        self.home.map(Coordinate::from)
    }

    pub fn set_home(&mut self, coordinate: Coordinate) {
        self.home = Some(SavedLocation {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "bikeshare", "bikeshare-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_public_feed_and_has_no_home() {
        let cfg = Config::default();

        assert_eq!(cfg.feed_url(), DEFAULT_FEED_URL);
        assert!(cfg.home_coordinate().is_none());
    }

    #[test]
    fn set_home_round_trips_through_coordinate() {
        let mut cfg = Config::default();
        cfg.set_home(Coordinate::new(40.7, -74.0));

        let home = cfg.home_coordinate().expect("home must be set");
        assert_eq!(home.latitude, 40.7);
        assert_eq!(home.longitude, -74.0);
    }

    #[test]
    fn feed_url_override_wins() {
        let cfg = Config {
            feed_url: Some("http://localhost:9999/stations.json".to_string()),
            home: None,
        };

        assert_eq!(cfg.feed_url(), "http://localhost:9999/stations.json");
    }

    #[test]
    fn config_survives_toml_round_trip() {
        let mut cfg = Config::default();
        cfg.set_home(Coordinate::new(40.7, -74.0));
        cfg.feed_url = Some("http://localhost:9999/stations.json".to_string());

        let text = toml::to_string_pretty(&cfg).expect("config must serialize");
        let back: Config = toml::from_str(&text).expect("config must parse");

        assert_eq!(back.feed_url(), cfg.feed_url());
        assert_eq!(
            back.home_coordinate().map(|c| (c.latitude, c.longitude)),
            Some((40.7, -74.0))
        );
    }
}
