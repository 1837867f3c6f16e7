//! Points and paths.

use crate::constants::COMPONENTS_PER_POINT;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// 3D point in toolpath space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Ordered sequence of points decoded from a flat `x, y, z, x, y, z, ...` buffer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Point3>,
}

impl Path {
    /// Decode a flat coordinate buffer, preserving point order.
    ///
    /// Fails with [`GeometryError::MalformedBuffer`] when the length is not a
    /// multiple of three. An empty buffer decodes to an empty path.
    pub fn decode(buffer: &[f32]) -> Result<Self, GeometryError> {
        if buffer.len() % COMPONENTS_PER_POINT != 0 {
            return Err(GeometryError::MalformedBuffer { len: buffer.len() });
        }

        let points = buffer
            .chunks_exact(COMPONENTS_PER_POINT)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        Ok(Self { points })
    }

    pub fn from_points(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Flatten back into a coordinate buffer. Inverse of [`Path::decode`].
    pub fn flatten(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len() * COMPONENTS_PER_POINT);
        for p in &self.points {
            out.extend_from_slice(&p.to_array());
        }
        out
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of consecutive point pairs.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Endpoints of segment `index`, if it exists.
    pub fn segment(&self, index: usize) -> Option<(Point3, Point3)> {
        Some((*self.points.get(index)?, *self.points.get(index + 1)?))
    }
}
