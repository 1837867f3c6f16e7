//! Geometry buffers and their material tags.

use printviz_core::{GeometryError, MoveKind, Rgb};
use serde::{Deserialize, Serialize};

/// Flat geometry buffers handed to the renderer
///
/// `indices` and `normals` are present only for ribbon meshes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryBuffer {
    /// `x, y, z` triples
    pub vertices: Vec<f32>,
    /// Triangle list into `vertices`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,
    /// One normal triple per vertex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<f32>>,
}

impl GeometryBuffer {
    /// Indexed triangle mesh with per-vertex normals
    pub fn mesh(vertices: Vec<f32>, indices: Vec<u32>, normals: Vec<f32>) -> Self {
        Self {
            vertices,
            indices: Some(indices),
            normals: Some(normals),
        }
    }

    /// Bare vertex list (line segments, strips or points)
    pub fn vertices_only(vertices: Vec<f32>) -> Self {
        Self {
            vertices,
            indices: None,
            normals: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |i| i.len() / 3)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check the buffer invariants.
    ///
    /// Every index addresses a vertex, the index list is a whole number of
    /// triangles, and normals pair one-to-one with vertices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.len() % 3 != 0 {
            return Err(GeometryError::MalformedBuffer {
                len: self.vertices.len(),
            });
        }

        if let Some(indices) = &self.indices {
            if indices.len() % 3 != 0 {
                return Err(GeometryError::MisalignedIndices { len: indices.len() });
            }
            let vertex_count = self.vertex_count();
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        if let Some(normals) = &self.normals {
            if normals.len() != self.vertices.len() {
                return Err(GeometryError::NormalCountMismatch {
                    normals: normals.len(),
                    vertices: self.vertices.len(),
                });
            }
        }

        Ok(())
    }
}

/// What a geometry buffer represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    /// Indexed triangle ribbon with normals
    Ribbon,
    /// Disconnected line segments, two vertices each
    LineSet,
    /// Connected polyline (workspace preview)
    LineStrip,
    /// Point sprites (workspace preview)
    Points,
}

impl GeometryKind {
    pub fn for_move(kind: MoveKind) -> Self {
        match kind {
            MoveKind::Extrude => Self::Ribbon,
            MoveKind::Travel => Self::LineSet,
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ribbon => write!(f, "ribbon"),
            Self::LineSet => write!(f, "line set"),
            Self::LineStrip => write!(f, "line strip"),
            Self::Points => write!(f, "points"),
        }
    }
}

/// Material metadata the shader uses for coloring and visibility filtering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialTags {
    pub tool_code: u32,
    pub type_code: i32,
    pub layer_index: usize,
    /// Group color, or the tool color when the group has none
    pub color: Rgb,
    /// Tool-indexed base color
    pub tool_color: Rgb,
}

impl MaterialTags {
    /// Tags for non-layered workspace previews
    pub fn workspace() -> Self {
        Self {
            tool_code: 0,
            type_code: 0,
            layer_index: 0,
            color: Rgb::WHITE,
            tool_color: Rgb::WHITE,
        }
    }
}

/// One independently renderable piece of output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedGeometry {
    pub kind: GeometryKind,
    pub buffer: GeometryBuffer,
    pub material: MaterialTags,
}
