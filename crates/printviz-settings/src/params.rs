//! Extrusion parameter table
//!
//! Maps `(tool code, first layer?)` to the ribbon cross-section and the
//! tool's display color. Slicers that still send the dual-extruder shape
//! (`extruderLlineWidth`, `layerHeight0`, ...) are accepted through
//! [`LegacyPrintParams`].

use crate::error::{ConfigError, ConfigResult};
use printviz_core::{GeometryError, Rgb};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ribbon cross-section dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionParams {
    pub width: f32,
    pub height: f32,
}

/// Line widths and color shared by tool entries and the fallback profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProfile {
    /// Line width for layers after the first
    pub line_width: f32,
    /// Line width on the first layer
    pub first_layer_line_width: f32,
    /// Display color as a `#rrggbb` hex triplet
    pub color: String,
}

impl LineProfile {
    pub fn new(line_width: f32, first_layer_line_width: f32, color: impl Into<String>) -> Self {
        Self {
            line_width,
            first_layer_line_width,
            color: color.into(),
        }
    }

    fn width_for(&self, first_layer: bool) -> f32 {
        if first_layer {
            self.first_layer_line_width
        } else {
            self.line_width
        }
    }

    fn validate(&self, key: &str) -> ConfigResult<()> {
        check_positive(&format!("{}.line_width", key), self.line_width)?;
        check_positive(
            &format!("{}.first_layer_line_width", key),
            self.first_layer_line_width,
        )?;
        Rgb::from_hex(&self.color).map_err(|_| ConfigError::InvalidColor {
            key: format!("{}.color", key),
            value: self.color.clone(),
        })?;
        Ok(())
    }
}

impl Default for LineProfile {
    fn default() -> Self {
        Self::new(0.4, 0.4, "#ffffff")
    }
}

/// Per-tool entry of the parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub tool_code: u32,
    #[serde(flatten)]
    pub profile: LineProfile,
}

impl ToolProfile {
    pub fn new(tool_code: u32, profile: LineProfile) -> Self {
        Self { tool_code, profile }
    }
}

/// Parameters resolved for one move group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTool {
    pub params: ExtrusionParams,
    /// Tool-indexed default color
    pub color: Rgb,
}

/// Extrusion parameter table keyed by tool code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    /// Layer height for layers after the first
    pub layer_height: f32,
    /// Height of the first layer
    pub first_layer_height: f32,
    /// Known tools
    #[serde(default)]
    pub tools: Vec<ToolProfile>,
    /// Profile used for tool codes missing from `tools`
    #[serde(default)]
    pub fallback: LineProfile,
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self {
            layer_height: 0.2,
            first_layer_height: 0.3,
            tools: vec![
                ToolProfile::new(0, LineProfile::new(0.4, 0.45, "#3a7bd5")),
                ToolProfile::new(1, LineProfile::new(0.4, 0.45, "#e4572e")),
            ],
            fallback: LineProfile::default(),
        }
    }
}

impl ParameterTable {
    pub fn tool(&self, tool_code: u32) -> Option<&ToolProfile> {
        self.tools.iter().find(|t| t.tool_code == tool_code)
    }

    fn height_for(&self, first_layer: bool) -> f32 {
        if first_layer {
            self.first_layer_height
        } else {
            self.layer_height
        }
    }

    /// Resolve width, height and tool color for a group.
    ///
    /// Fails with [`GeometryError::UnknownToolCode`] when the tool is not in
    /// the table; callers decide whether to fall back.
    pub fn resolve(&self, tool_code: u32, first_layer: bool) -> Result<ResolvedTool, GeometryError> {
        let tool = self
            .tool(tool_code)
            .ok_or(GeometryError::UnknownToolCode { tool_code })?;
        self.resolve_profile(&tool.profile, first_layer)
    }

    /// Resolve against the fallback profile.
    pub fn resolve_fallback(&self, first_layer: bool) -> Result<ResolvedTool, GeometryError> {
        self.resolve_profile(&self.fallback, first_layer)
    }

    fn resolve_profile(
        &self,
        profile: &LineProfile,
        first_layer: bool,
    ) -> Result<ResolvedTool, GeometryError> {
        Ok(ResolvedTool {
            params: ExtrusionParams {
                width: profile.width_for(first_layer),
                height: self.height_for(first_layer),
            },
            color: Rgb::from_hex(&profile.color)?,
        })
    }

    /// Validate the table
    pub fn validate(&self) -> ConfigResult<()> {
        check_positive("layer_height", self.layer_height)?;
        check_positive("first_layer_height", self.first_layer_height)?;

        let mut seen = HashSet::new();
        for (i, tool) in self.tools.iter().enumerate() {
            if !seen.insert(tool.tool_code) {
                return Err(ConfigError::DuplicateTool(tool.tool_code));
            }
            tool.profile.validate(&format!("tools[{}]", i))?;
        }

        self.fallback.validate("fallback")
    }
}

fn check_positive(key: &str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Tool colors in the dual-extruder parameter shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyExtruderColors {
    pub tool_color0: String,
    pub tool_color1: String,
}

/// Dual-extruder parameter shape: left extruder is tool 0, right is tool 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPrintParams {
    pub layer_height: f32,
    pub layer_height0: f32,
    #[serde(rename = "extruderLlineWidth")]
    pub left_line_width: f32,
    #[serde(rename = "extruderLlineWidth0")]
    pub left_line_width0: f32,
    #[serde(rename = "extruderRlineWidth")]
    pub right_line_width: f32,
    #[serde(rename = "extruderRlineWidth0")]
    pub right_line_width0: f32,
    pub extruder_colors: LegacyExtruderColors,
}

impl From<LegacyPrintParams> for ParameterTable {
    fn from(p: LegacyPrintParams) -> Self {
        Self {
            layer_height: p.layer_height,
            first_layer_height: p.layer_height0,
            tools: vec![
                ToolProfile::new(
                    0,
                    LineProfile::new(
                        p.left_line_width,
                        p.left_line_width0,
                        p.extruder_colors.tool_color0,
                    ),
                ),
                ToolProfile::new(
                    1,
                    LineProfile::new(
                        p.right_line_width,
                        p.right_line_width0,
                        p.extruder_colors.tool_color1,
                    ),
                ),
            ],
            fallback: LineProfile::default(),
        }
    }
}

/// Parameter table in either accepted wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrintParams {
    Table(ParameterTable),
    Legacy(LegacyPrintParams),
}

impl PrintParams {
    pub fn into_table(self) -> ParameterTable {
        match self {
            PrintParams::Table(t) => t,
            PrintParams::Legacy(l) => l.into(),
        }
    }
}

impl From<ParameterTable> for PrintParams {
    fn from(table: ParameterTable) -> Self {
        PrintParams::Table(table)
    }
}
