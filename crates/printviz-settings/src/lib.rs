//! printviz Settings Crate
//!
//! Handles extrusion parameter tables, engine options, and their
//! persistence as JSON or TOML files.

pub mod config;
pub mod error;
pub mod params;

pub use config::{Config, DegeneratePolicy, ExtrusionOptions};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use params::{
    ExtrusionParams, LegacyExtruderColors, LegacyPrintParams, LineProfile, ParameterTable,
    PrintParams, ResolvedTool, ToolProfile,
};
