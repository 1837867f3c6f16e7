//! # printviz
//!
//! Toolpath preview mesh engine for 3D printing and CNC front-ends.
//!
//! ## Architecture
//!
//! printviz is organized as a workspace with multiple crates:
//!
//! 1. **printviz-core** - Toolpath data model, path decoding, colors, errors
//! 2. **printviz-settings** - Extrusion parameter table and config files
//! 3. **printviz-visualizer** - Ribbon extrusion, layer assembly, render meshes, worker
//! 4. **printviz** - Command-line front-end that integrates all crates
//!
//! ## Features
//!
//! - **Ribbon Extrusion**: Rectangular cross-section tubes with caps at breaks
//! - **Travel Lines**: Disconnected line segments for non-printing moves
//! - **Failure Isolation**: A bad move group never blanks the whole preview
//! - **Background Processing**: Requests run on a tokio worker off the UI thread

use anyhow::Context;
use std::path::Path;
use tracing::info;

pub use printviz_core::{
    BreakSet, ColorSpec, Error, GeometryError, Layer, MoveGroup, MoveKind, Point3, RequestError,
    Result, Rgb, Toolpath,
};

pub use printviz_settings::{
    Config, DegeneratePolicy, ExtrusionOptions, ExtrusionParams, ParameterTable, PrintParams,
};

pub use printviz_visualizer::{
    package, AssemblyStats, GeometryBuffer, GeometryKind, GeometryWorker, GeometryWorkerHandle,
    GroupFailure, LayerAssembler, MaterialTags, MeshCollection, RenderRequest, RenderResponse,
    RibbonExtruder, ShadingMode, TaggedGeometry, TravelLinearizer, WorkspaceRender,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr (stdout carries responses)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(())
}

/// Read a request file, applying an optional config file on top.
///
/// The config's parameter table replaces whatever table the request carries;
/// its extrusion options are returned for the caller to run the request with.
pub fn load_request(
    request_path: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<(RenderRequest, ExtrusionOptions)> {
    let json = std::fs::read_to_string(request_path)
        .with_context(|| format!("reading {}", request_path.display()))?;
    let mut request = RenderRequest::from_json(&json)
        .with_context(|| format!("parsing {}", request_path.display()))?;

    let mut options = ExtrusionOptions::default();
    if let Some(config_path) = config_path {
        let config = Config::load_from_file(config_path)
            .with_context(|| format!("loading {}", config_path.display()))?;
        info!("Using parameters from {}", config_path.display());
        options = config.extrusion;
        request = request.with_params(config.params);
    }

    Ok((request, options))
}

/// Load and process a request file synchronously.
pub fn render_request_file(
    request_path: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<RenderResponse> {
    let (request, options) = load_request(request_path, config_path)?;
    Ok(package(request, options)?)
}
