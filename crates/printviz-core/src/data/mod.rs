//! Toolpath data model
//!
//! This module provides:
//! - Points and paths decoded from flat coordinate buffers
//! - Break sets marking discontinuities along a path
//! - Move groups, layers, and whole toolpaths as received from the slicer
//! - Normalized RGB colors and their wire encodings

pub mod color;
pub mod point;
pub mod toolpath;

pub use color::{ColorSpec, Rgb};
pub use point::{Path, Point3};
pub use toolpath::{BreakSet, Layer, MoveGroup, MoveKind, Toolpath};
