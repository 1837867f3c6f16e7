//! Workspace preview geometry
//!
//! The workspace view draws a raw coordinate stream without layering or
//! extrusion, either as point sprites or as one connected polyline.

use printviz_core::{GeometryError, Path};
use serde::{Deserialize, Serialize};

use super::geometry::{GeometryBuffer, GeometryKind, MaterialTags, TaggedGeometry};

/// How a workspace buffer is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRender {
    #[serde(alias = "point")]
    Points,
    #[default]
    Line,
}

impl WorkspaceRender {
    pub fn kind(self) -> GeometryKind {
        match self {
            Self::Points => GeometryKind::Points,
            Self::Line => GeometryKind::LineStrip,
        }
    }

    /// Build the single workspace geometry for a flat coordinate buffer.
    pub fn geometry(self, positions: &[f32]) -> Result<TaggedGeometry, GeometryError> {
        let path = Path::decode(positions)?;
        Ok(TaggedGeometry {
            kind: self.kind(),
            buffer: GeometryBuffer::vertices_only(path.flatten()),
            material: MaterialTags::workspace(),
        })
    }
}
