//! # printviz Visualizer
//!
//! Toolpath-to-mesh extrusion for printviz.
//! Turns layered toolpaths into ribbon meshes and travel line sets,
//! packages them for the renderer, and runs the work off the UI thread.

pub mod visualizer;
pub mod worker;

pub use visualizer::{
    Assembly, AssemblyStats, GeometryBuffer, GeometryKind, GroupFailure, GroupGeometry,
    LayerAssembler, MaterialTags, MeshCollection, MeshMaterial, Primitive, RenderableMesh,
    RibbonExtruder, RibbonMesh, TaggedGeometry, TravelLinearizer, WorkspaceRender,
};

pub use worker::{
    package, GeometryWorker, GeometryWorkerHandle, PendingReply, RenderRequest, RenderResponse,
    RequestId, ShadingMode, WorkerReply,
};
