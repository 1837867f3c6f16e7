//! Layered toolpath input as produced by the slicer.

use super::color::ColorSpec;
use super::point::Path;
use crate::constants::{FIRST_LAYER_INDEX, TRAVEL_TYPE_CODE};
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Classification of a move group, resolved once from its type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Material-depositing move, rendered as a ribbon
    Extrude,
    /// Non-depositing repositioning move, rendered as plain lines
    Travel,
}

impl MoveKind {
    pub fn from_type_code(type_code: i32) -> Self {
        if type_code == TRAVEL_TYPE_CODE {
            Self::Travel
        } else {
            Self::Extrude
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extrude => write!(f, "extrude"),
            Self::Travel => write!(f, "travel"),
        }
    }
}

/// Set of segment indices that are discontinuities
///
/// Index `i` means the segment between point `i` and point `i + 1` is a jump,
/// not a physical move. Only indices in `[0, n - 2]` are retained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BreakSet {
    indices: BTreeSet<usize>,
    ignored: usize,
}

impl BreakSet {
    /// Build a break set for a path of `path_len` points, dropping indices
    /// that do not address a segment.
    pub fn for_path(raw: &[usize], path_len: usize) -> Self {
        let segments = path_len.saturating_sub(1);
        let mut indices = BTreeSet::new();
        let mut ignored = 0;

        for &index in raw {
            if index < segments {
                indices.insert(index);
            } else {
                ignored += 1;
                debug!(
                    "{}",
                    GeometryError::InvalidBreakIndex { index, path_len }
                );
            }
        }

        Self { indices, ignored }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of raw indices dropped for being out of range.
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

/// Contiguous run of moves sharing tool and move type within one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveGroup {
    /// Flat `x, y, z` coordinate buffer
    pub positions: Vec<f32>,
    /// Raw break indices, validated against the decoded path
    #[serde(default, alias = "breakPositionsIndex")]
    pub breaks: Vec<usize>,
    #[serde(alias = "toolCode")]
    pub tool_code: u32,
    #[serde(alias = "typeCode")]
    pub type_code: i32,
    /// Group display color; the tool color is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    /// Explicit first-layer flag; derived from the layer index when absent
    #[serde(
        default,
        alias = "isFirstLayer",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_first_layer: Option<bool>,
}

impl MoveGroup {
    pub fn new(positions: Vec<f32>, tool_code: u32, type_code: i32) -> Self {
        Self {
            positions,
            breaks: Vec::new(),
            tool_code,
            type_code,
            color: None,
            is_first_layer: None,
        }
    }

    pub fn with_breaks(mut self, breaks: Vec<usize>) -> Self {
        self.breaks = breaks;
        self
    }

    pub fn with_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_first_layer(mut self, first: bool) -> Self {
        self.is_first_layer = Some(first);
        self
    }

    pub fn kind(&self) -> MoveKind {
        MoveKind::from_type_code(self.type_code)
    }

    pub fn decode_path(&self) -> Result<Path, GeometryError> {
        Path::decode(&self.positions)
    }

    /// Whether this group is printed with first-layer parameters.
    pub fn is_first_layer(&self, layer_index: usize) -> bool {
        self.is_first_layer
            .unwrap_or(layer_index == FIRST_LAYER_INDEX)
    }
}

/// One layer of the toolpath
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer {
    pub groups: Vec<MoveGroup>,
}

impl Layer {
    pub fn new(groups: Vec<MoveGroup>) -> Self {
        Self { groups }
    }
}

/// Ordered layers of a print or machining job
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Toolpath {
    pub layers: Vec<Layer>,
}

impl Toolpath {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn group_count(&self) -> usize {
        self.layers.iter().map(|l| l.groups.len()).sum()
    }
}
