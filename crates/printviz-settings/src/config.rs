//! Configuration management for printviz
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Extrusion parameter table (line widths, layer heights, tool colors)
//! - Extrusion engine options (degenerate segment handling)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use crate::params::ParameterTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the ribbon extruder treats zero-length segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Treat the segment as a break and cap the ribbon around it
    #[default]
    Skip,
    /// Fail the whole move group
    Reject,
}

impl std::fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Extrusion engine options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtrusionOptions {
    #[serde(default)]
    pub degenerate_policy: DegeneratePolicy,
}

/// Complete printviz configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extrusion parameter table
    #[serde(default)]
    pub params: ParameterTable,
    /// Extrusion engine options
    #[serde(default)]
    pub extrusion: ExtrusionOptions,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, `<config dir>/printviz/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("printviz").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(
            "Loaded config from {} ({} tools, degenerate segments: {})",
            path.display(),
            config.params.tools.len(),
            config.extrusion.degenerate_policy
        );
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.extrusion.degenerate_policy, DegeneratePolicy::Skip);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_default_path_location() {
        match Config::default_path() {
            Ok(path) => {
                assert!(path.ends_with(Path::new("printviz").join("config.toml")));
                assert!(matches!(format_of(&path), Ok(Format::Toml)));
            }
            Err(err) => assert!(matches!(
                err,
                SettingsError::Config(ConfigError::UnsupportedPlatform(_))
            )),
        }
    }

    #[test]
    fn test_policy_wire_names() {
        let options: ExtrusionOptions =
            serde_json::from_str(r#"{"degenerate_policy":"reject"}"#).unwrap();
        assert_eq!(options.degenerate_policy, DegeneratePolicy::Reject);

        let options: ExtrusionOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.degenerate_policy, DegeneratePolicy::Skip);
    }
}
