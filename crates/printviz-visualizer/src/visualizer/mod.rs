//! Toolpath mesh generation
//!
//! This module provides:
//! - Ribbon extrusion for material-depositing moves (ribbon)
//! - Line-segment buffers for travel moves (travel)
//! - Point and polyline pass-through for workspace previews (workspace)
//! - Per-layer, per-group assembly with failure isolation (assembler)
//! - Interleaved render meshes for upload (mesh_rendering)

pub mod assembler;
pub mod geometry;
pub mod mesh_rendering;
pub mod ribbon;
pub mod travel;
pub mod workspace;

pub use assembler::{Assembly, AssemblyStats, GroupFailure, GroupGeometry, LayerAssembler};
pub use geometry::{GeometryBuffer, GeometryKind, MaterialTags, TaggedGeometry};
pub use mesh_rendering::{MeshCollection, MeshMaterial, Primitive, RenderableMesh};
pub use ribbon::{RibbonExtruder, RibbonMesh};
pub use travel::TravelLinearizer;
pub use workspace::WorkspaceRender;
