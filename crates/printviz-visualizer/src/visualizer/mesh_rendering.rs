//! # Render Mesh Module
//!
//! Converts tagged toolpath geometry into interleaved vertex data ready for
//! GPU upload. Each vertex is `[x, y, z, nx, ny, nz, r, g, b, a]`.

use glam::{Mat4, Vec3};

use super::geometry::{GeometryKind, TaggedGeometry};
use super::ribbon::UP;

/// Floats per interleaved vertex
pub const FLOATS_PER_VERTEX: usize = 10;

/// How `indices` are to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
    Points,
}

impl Primitive {
    pub fn for_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Ribbon => Self::Triangles,
            GeometryKind::LineSet | GeometryKind::LineStrip => Self::Lines,
            GeometryKind::Points => Self::Points,
        }
    }
}

/// A renderable mesh for one tagged geometry
#[derive(Debug, Clone)]
pub struct RenderableMesh {
    /// Vertex data: [x, y, z, nx, ny, nz, r, g, b, a] per vertex
    pub vertices: Vec<f32>,
    /// Triangle, line-pair or point indices depending on `primitive`
    pub indices: Vec<u32>,
    pub primitive: Primitive,
    /// Mesh bounds for culling
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    /// Material properties
    pub material: MeshMaterial,
    /// Source layer, for layer range filtering
    pub layer_index: usize,
}

/// Material properties for mesh rendering
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMaterial {
    /// Diffuse color (RGBA)
    pub diffuse_color: [f32; 4],
    /// Ambient color (RGBA)
    pub ambient_color: [f32; 4],
    /// Transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub alpha: f32,
    /// Whether lighting applies
    pub lit: bool,
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            diffuse_color: [1.0, 1.0, 1.0, 1.0],
            ambient_color: [0.3, 0.3, 0.3, 1.0],
            alpha: 1.0,
            lit: true,
        }
    }
}

impl MeshMaterial {
    /// Lit material for extruded ribbons
    pub fn solid(color: [f32; 4]) -> Self {
        Self {
            diffuse_color: color,
            ambient_color: [color[0] * 0.3, color[1] * 0.3, color[2] * 0.3, color[3]],
            alpha: color[3],
            ..Default::default()
        }
    }

    /// Unlit material for travel lines and workspace previews
    pub fn line(color: [f32; 4]) -> Self {
        Self {
            diffuse_color: color,
            ambient_color: color,
            alpha: color[3],
            lit: false,
            ..Default::default()
        }
    }
}

impl RenderableMesh {
    /// Interleave a tagged geometry.
    pub fn from_tagged(geometry: &TaggedGeometry) -> Self {
        let buffer = &geometry.buffer;
        let color = geometry.material.color.to_rgba(1.0);
        let count = buffer.vertex_count();

        let mut vertices = Vec::with_capacity(count * FLOATS_PER_VERTEX);
        let mut bounds_min = Vec3::splat(f32::MAX);
        let mut bounds_max = Vec3::splat(f32::MIN);

        for i in 0..count {
            let pos = Vec3::from_slice(&buffer.vertices[i * 3..i * 3 + 3]);
            let normal = buffer
                .normals
                .as_ref()
                .and_then(|n| n.get(i * 3..i * 3 + 3))
                .and_then(|n| Vec3::from_slice(n).try_normalize())
                .unwrap_or(UP);

            bounds_min = bounds_min.min(pos);
            bounds_max = bounds_max.max(pos);

            vertices.extend_from_slice(&pos.to_array());
            vertices.extend_from_slice(&normal.to_array());
            vertices.extend_from_slice(&color);
        }

        if count == 0 {
            bounds_min = Vec3::ZERO;
            bounds_max = Vec3::ZERO;
        }

        let count = count as u32;
        let indices = match geometry.kind {
            GeometryKind::Ribbon => buffer.indices.clone().unwrap_or_default(),
            GeometryKind::LineSet | GeometryKind::Points => (0..count).collect(),
            GeometryKind::LineStrip => (1..count).flat_map(|i| [i - 1, i]).collect(),
        };

        let material = match geometry.kind {
            GeometryKind::Ribbon => MeshMaterial::solid(color),
            _ => MeshMaterial::line(color),
        };

        Self {
            vertices,
            indices,
            primitive: Primitive::for_kind(geometry.kind),
            bounds_min,
            bounds_max,
            material,
            layer_index: geometry.material.layer_index,
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        match self.primitive {
            Primitive::Triangles => self.indices.len() / 3,
            Primitive::Lines | Primitive::Points => 0,
        }
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Transform mesh vertices by a matrix
    pub fn transform(&mut self, transform: &Mat4) {
        if self.vertices.is_empty() {
            return;
        }

        let normal_matrix = transform.inverse().transpose();

        for chunk in self.vertices.chunks_mut(FLOATS_PER_VERTEX) {
            let pos = transform.transform_point3(Vec3::from_slice(&chunk[0..3]));
            chunk[0..3].copy_from_slice(&pos.to_array());

            let normal = normal_matrix
                .transform_vector3(Vec3::from_slice(&chunk[3..6]))
                .normalize_or_zero();
            chunk[3..6].copy_from_slice(&normal.to_array());
        }

        // Recalculate bounds
        let mut min_pos = Vec3::splat(f32::MAX);
        let mut max_pos = Vec3::splat(f32::MIN);

        for chunk in self.vertices.chunks(FLOATS_PER_VERTEX) {
            let pos = Vec3::from_slice(&chunk[0..3]);
            min_pos = min_pos.min(pos);
            max_pos = max_pos.max(pos);
        }

        self.bounds_min = min_pos;
        self.bounds_max = max_pos;
    }
}

/// Collection of meshes for rendering
#[derive(Debug, Clone)]
pub struct MeshCollection {
    pub meshes: Vec<RenderableMesh>,
}

impl MeshCollection {
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    pub fn from_geometries<'a>(geometries: impl IntoIterator<Item = &'a TaggedGeometry>) -> Self {
        Self {
            meshes: geometries.into_iter().map(RenderableMesh::from_tagged).collect(),
        }
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count()).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    /// Meshes whose source layer is within `[first, last]`
    pub fn layer_range(&self, first: usize, last: usize) -> impl Iterator<Item = &RenderableMesh> + '_ {
        self.meshes
            .iter()
            .filter(move |m| (first..=last).contains(&m.layer_index))
    }

    /// Get combined bounds of all non-empty meshes
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut filled = self.meshes.iter().filter(|m| !m.vertices.is_empty()).peekable();
        filled.peek()?;

        let mut min_bounds = Vec3::splat(f32::MAX);
        let mut max_bounds = Vec3::splat(f32::MIN);

        for mesh in filled {
            min_bounds = min_bounds.min(mesh.bounds_min);
            max_bounds = max_bounds.max(mesh.bounds_max);
        }

        Some((min_bounds, max_bounds))
    }
}

impl Default for MeshCollection {
    fn default() -> Self {
        Self::new()
    }
}
