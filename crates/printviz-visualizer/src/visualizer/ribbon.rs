//! Ribbon extrusion
//!
//! Sweeps a rectangular cross-section along a path, one box per segment.
//! Ring corners are stored in the order top, right, bottom, left, so
//! vertex `k` of a segment is corner `k % 4` of the start ring (`k < 4`)
//! or of the end ring (`k >= 4`). Segments in the same sub-path share no
//! vertices; only sub-path boundaries get caps.

use glam::Vec3;
use printviz_core::{BreakSet, GeometryError, Path, Point3};
use printviz_settings::{DegeneratePolicy, ExtrusionParams};
use tracing::trace;

use super::geometry::GeometryBuffer;

/// Build-plate normal
pub const UP: Vec3 = Vec3::Z;

/// Lateral axis used when a segment is parallel to [`UP`]
pub const LATERAL_FALLBACK: Vec3 = Vec3::X;

pub const VERTICES_PER_SEGMENT: u32 = 8;

/// Closes the start ring, facing against the direction of travel
pub const START_CAP: [u32; 6] = [0, 2, 1, 0, 3, 2];

/// Closes the end ring, facing along the direction of travel
pub const END_CAP: [u32; 6] = [4, 5, 6, 4, 6, 7];

/// Four outward-facing quads: left-top, top-right, right-bottom, bottom-left
#[rustfmt::skip]
pub const SIDE_QUADS: [u32; 24] = [
    3, 0, 7,  0, 4, 7,
    0, 1, 4,  1, 5, 4,
    1, 2, 5,  2, 6, 5,
    2, 3, 6,  3, 7, 6,
];

/// Result of extruding one path
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonMesh {
    pub buffer: GeometryBuffer,
    /// Zero-length segments dropped under [`DegeneratePolicy::Skip`]
    pub skipped_degenerate: usize,
}

#[derive(Default)]
struct MeshBuffers {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    normals: Vec<f32>,
}

impl MeshBuffers {
    fn with_segments(segments: usize) -> Self {
        let vertex_floats = segments * VERTICES_PER_SEGMENT as usize * 3;
        Self {
            vertices: Vec::with_capacity(vertex_floats),
            indices: Vec::with_capacity(segments * SIDE_QUADS.len() + 2 * START_CAP.len()),
            normals: Vec::with_capacity(vertex_floats),
        }
    }

    fn cursor(&self) -> u32 {
        (self.vertices.len() / 3) as u32
    }

    fn push_ring(&mut self, center: Vec3, offsets: &[Vec3; 4]) {
        for offset in offsets {
            self.vertices.extend_from_slice(&(center + *offset).to_array());
            self.normals.extend_from_slice(&offset.to_array());
        }
    }

    fn push_triangles(&mut self, base: u32, table: &[u32]) {
        self.indices.extend(table.iter().map(|i| base + i));
    }

    fn into_buffer(self) -> GeometryBuffer {
        GeometryBuffer::mesh(self.vertices, self.indices, self.normals)
    }
}

fn to_vec3(p: Point3) -> Vec3 {
    Vec3::from_array(p.to_array())
}

/// Extrudes paths into capped rectangular ribbons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonExtruder {
    params: ExtrusionParams,
    policy: DegeneratePolicy,
}

impl RibbonExtruder {
    pub fn new(params: ExtrusionParams, policy: DegeneratePolicy) -> Self {
        Self { params, policy }
    }

    pub fn params(&self) -> ExtrusionParams {
        self.params
    }

    /// Corner offsets `[top, right, bottom, left]` for a segment direction.
    pub fn cross_section(&self, direction: Vec3) -> [Vec3; 4] {
        let lateral = UP
            .cross(direction)
            .try_normalize()
            .unwrap_or(LATERAL_FALLBACK)
            * (self.params.width * 0.5);
        let vertical = UP * (self.params.height * 0.5);
        [vertical, -lateral, -vertical, lateral]
    }

    /// Extrude `path`, leaving a gap at every segment in `breaks`.
    ///
    /// Fails only under [`DegeneratePolicy::Reject`] when a non-break segment
    /// has zero length.
    pub fn extrude(&self, path: &Path, breaks: &BreakSet) -> Result<RibbonMesh, GeometryError> {
        let points = path.points();

        // None marks a gap: a break or a skipped zero-length segment
        let mut directions = Vec::with_capacity(path.segment_count());
        let mut skipped_degenerate = 0;

        for (i, pair) in points.windows(2).enumerate() {
            if breaks.contains(i) {
                directions.push(None);
                continue;
            }

            match (to_vec3(pair[1]) - to_vec3(pair[0])).try_normalize() {
                Some(direction) => directions.push(Some(direction)),
                None => match self.policy {
                    DegeneratePolicy::Skip => {
                        trace!("Skipping zero-length segment {}", i);
                        skipped_degenerate += 1;
                        directions.push(None);
                    }
                    DegeneratePolicy::Reject => {
                        return Err(GeometryError::DegenerateSegment { index: i });
                    }
                },
            }
        }

        let drawn = directions.iter().flatten().count();
        let mut buffers = MeshBuffers::with_segments(drawn);
        let last = directions.len().saturating_sub(1);

        for (i, direction) in directions.iter().enumerate() {
            let Some(direction) = direction else {
                continue;
            };

            let starts_run = i == 0 || directions[i - 1].is_none();
            let ends_run = i == last || directions[i + 1].is_none();

            let offsets = self.cross_section(*direction);
            let base = buffers.cursor();
            buffers.push_ring(to_vec3(points[i]), &offsets);
            buffers.push_ring(to_vec3(points[i + 1]), &offsets);

            if starts_run {
                buffers.push_triangles(base, &START_CAP);
            }
            buffers.push_triangles(base, &SIDE_QUADS);
            if ends_run {
                buffers.push_triangles(base, &END_CAP);
            }
        }

        trace!(
            "Extruded {} of {} segments ({} skipped as degenerate)",
            drawn,
            directions.len(),
            skipped_degenerate
        );

        Ok(RibbonMesh {
            buffer: buffers.into_buffer(),
            skipped_degenerate,
        })
    }
}
