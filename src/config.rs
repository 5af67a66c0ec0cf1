//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/salestree/salestree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `SALESTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for salestree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default hierarchy spec when a command does not name one
    pub hierarchy: Option<String>,
    /// Record leads nobody can take instead of aborting the run
    pub skip_unassignable: bool,
    /// Decimal places for risk figures in output
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hierarchy: None,
            skip_unassignable: false,
            precision: 2,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub hierarchy: Option<String>,
    pub skip_unassignable: Option<bool>,
    pub precision: Option<usize>,
}

/// Get the XDG config directory for salestree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "salestree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("salestree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            hierarchy: overlay
                .hierarchy
                .clone()
                .or_else(|| self.hierarchy.clone()),
            skip_unassignable: overlay.skip_unassignable.unwrap_or(self.skip_unassignable),
            precision: overlay.precision.unwrap_or(self.precision),
        }
    }

    /// Load settings from the standard locations.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `global` - Global config file, skipped if missing
    /// * `explicit` - Config file named by the user, must exist
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, optional
        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config, required
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply SALESTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SALESTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_override(config.get_string("hierarchy"))? {
            settings.hierarchy = Some(val);
        }
        if let Some(val) = env_override(config.get_bool("skip_unassignable"))? {
            settings.skip_unassignable = val;
        }
        if let Some(val) = env_override(config.get_int("precision"))? {
            settings.precision = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("precision must not be negative: {}", val),
            })?;
        }

        Ok(settings)
    }

    /// Render as TOML, as written by `config init`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// An unset variable is no override; an unparsable one is an error.
fn env_override<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
