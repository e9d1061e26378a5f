//! Starhelm configuration.
//!
//! Loaded from `~/.starhelm/config.toml`. Every key is optional and a
//! missing file means defaults. Command-line flags override per run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use starhelm::navigate::AlternativeStrategy;
use tracing::debug;

/// Starhelm configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Distance walked per follower step, km.
    pub step_size_km: f64,

    /// Legs allowed per route.
    pub max_iterations: u32,

    /// Alternative routes to return.
    pub max_routes: usize,

    /// Objects must be above this altitude to be considered, degrees.
    pub min_altitude: f64,

    /// Objects must be brighter than this magnitude.
    pub max_magnitude: f64,

    /// Prefer planets, sun, moon, and navigational stars.
    pub prioritize_major: bool,

    /// Which set of route variants to try for alternatives.
    pub alternatives: AlternativeStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_size_km: 10.0,
            max_iterations: 100,
            max_routes: 3,
            min_altitude: 0.0,
            max_magnitude: 6.0,
            prioritize_major: false,
            alternatives: AlternativeStrategy::default(),
        }
    }
}

impl Config {
    /// Load config from `~/.starhelm/config.toml`, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config
            .validate()
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.step_size_km > 0.0 && self.step_size_km <= 100.0) {
            return Err(format!(
                "step size must be in (0, 100] km, got {}",
                self.step_size_km
            ));
        }
        if !(10..=1000).contains(&self.max_iterations) {
            return Err(format!(
                "max iterations must be in [10, 1000], got {}",
                self.max_iterations
            ));
        }
        if !(1..=5).contains(&self.max_routes) {
            return Err(format!(
                "max routes must be in [1, 5], got {}",
                self.max_routes
            ));
        }
        Ok(())
    }

    /// The config file path: `~/.starhelm/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".starhelm").join("config.toml"))
    }
}
