//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sxv/sxv.toml`
//! 3. Environment variables: `SXV_*` prefix
//! 4. Command-line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outline::DEFAULT_MAX_DEPTH;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment overrides: {0}")]
    Env(#[from] ConfigError),

    #[error("serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Unified configuration for sxv.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum list nesting accepted during projection (minimum 1)
    pub max_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Raw settings for intermediate parsing: every field is Option so that
/// "not specified, inherit from the layer below" stays distinguishable.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
}

/// Get the XDG config directory for sxv.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sxv").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sxv.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise the base is kept.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// 1. Compiled defaults
    /// 2. Global config file (if present)
    /// 3. `SXV_*` environment variables
    pub fn load() -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.clamp();
        Ok(current)
    }

    /// Apply SXV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let builder = Config::builder().add_source(Environment::with_prefix("SXV"));
        let config = builder.build()?;

        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = val.max(0) as usize;
        }

        Ok(settings)
    }

    // A depth limit below 1 would reject every document, including `()`.
    fn clamp(&mut self) {
        self.max_depth = self.max_depth.max(1);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overlay_when_merging_then_keeps_defaults() {
        let settings = Settings::default().merge_with(&RawSettings::default());
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn given_overlay_value_when_merging_then_overlay_wins() {
        let overlay = RawSettings {
            max_depth: Some(16),
        };
        let settings = Settings::default().merge_with(&overlay);
        assert_eq!(settings.max_depth, 16);
    }

    #[test]
    fn given_env_override_when_applying_then_env_wins() {
        // Every SXV_MAX_DEPTH case lives in this one test; test threads
        // share the process environment.
        std::env::set_var("SXV_MAX_DEPTH", "9");
        let overridden = Settings::apply_env_overrides(Settings::default()).expect("env overrides");

        std::env::set_var("SXV_MAX_DEPTH", "-4");
        let floored = Settings::apply_env_overrides(Settings::default()).expect("env overrides");
        std::env::remove_var("SXV_MAX_DEPTH");

        assert_eq!(overridden.max_depth, 9);
        assert_eq!(floored.max_depth, 0);
    }

    #[test]
    fn given_zero_depth_when_clamping_then_raises_to_one() {
        let mut settings = Settings { max_depth: 0 };
        settings.clamp();
        assert_eq!(settings.max_depth, 1);
    }

    #[test]
    fn given_settings_when_rendering_toml_then_round_trips() {
        let settings = Settings { max_depth: 32 };
        let rendered = settings.to_toml().expect("serialize settings");
        let raw: RawSettings = toml::from_str(&rendered).expect("reparse settings");
        assert_eq!(raw.max_depth, Some(32));
    }
}
