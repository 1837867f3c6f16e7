//! Travel move linearization

use printviz_core::{BreakSet, Path};

use super::geometry::GeometryBuffer;

/// Turns travel paths into disconnected line segments
///
/// Every consecutive point pair becomes its own two-vertex segment; pairs
/// crossing a break are dropped. No indices, no normals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelLinearizer;

impl TravelLinearizer {
    pub fn linearize(path: &Path, breaks: &BreakSet) -> GeometryBuffer {
        let points = path.points();
        let mut vertices = Vec::with_capacity(path.segment_count() * 6);

        for (i, pair) in points.windows(2).enumerate() {
            if breaks.contains(i) {
                continue;
            }
            vertices.extend_from_slice(&pair[0].to_array());
            vertices.extend_from_slice(&pair[1].to_array());
        }

        GeometryBuffer::vertices_only(vertices)
    }
}
