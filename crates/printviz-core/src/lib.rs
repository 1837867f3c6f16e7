//! # printviz Core
//!
//! Core types and utilities for printviz.
//! Provides the toolpath data model consumed by the mesh engine,
//! the flat-buffer path decoder, and the shared error taxonomy.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{
    BreakSet, ColorSpec, Layer, MoveGroup, MoveKind, Path, Point3, Rgb, Toolpath,
};

pub use error::{Error, GeometryError, RequestError, Result};
