//! Error handling for printviz
//!
//! Provides error types for every layer of the mesh engine:
//! - Geometry errors (per-group decoding and extrusion problems)
//! - Request errors (top-level malformed input)
//!
//! All error types use `thiserror` for ergonomic error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geometry error type
///
/// Represents problems with a single move group. The assembler isolates
/// these so that one bad group never blanks the whole visualization.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryError {
    /// Coordinate buffer length is not a multiple of three
    #[error("Malformed coordinate buffer: length {len} is not a multiple of 3")]
    MalformedBuffer {
        /// The length of the offending buffer.
        len: usize,
    },

    /// Break index does not address a segment of the path
    #[error("Break index {index} out of range for path of {path_len} points")]
    InvalidBreakIndex {
        /// The break index that was supplied.
        index: usize,
        /// The number of points in the path.
        path_len: usize,
    },

    /// Zero-length segment that has no tangent
    #[error("Degenerate zero-length segment at index {index}")]
    DegenerateSegment {
        /// Index of the segment's first point.
        index: usize,
    },

    /// Tool code missing from the parameter table
    #[error("Unknown tool code {tool_code}")]
    UnknownToolCode {
        /// The tool code that was not found.
        tool_code: u32,
    },

    /// Color could not be decoded
    #[error("Invalid color: {value}")]
    InvalidColor {
        /// The rejected color value.
        value: String,
    },

    /// Index list is not a whole number of triangles
    #[error("Index buffer length {len} is not a multiple of 3")]
    MisalignedIndices { len: usize },

    /// Mesh index points past the end of the vertex list
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Normals do not pair one-to-one with vertices
    #[error("{normals} normal components for {vertices} vertex components")]
    NormalCountMismatch { normals: usize, vertices: usize },
}

/// Request error type
///
/// Fatal problems with the input message as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Parameter table is required for layered processing
    #[error("Request is missing the parameter table")]
    MissingParams,

    /// Request shape is not usable
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected.
        reason: String,
    },
}

/// Main error type for printviz
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Request error
    #[error(transparent)]
    Request(#[from] RequestError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a request error
    pub fn is_request_error(&self) -> bool {
        matches!(self, Error::Request(_) | Error::Json(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
