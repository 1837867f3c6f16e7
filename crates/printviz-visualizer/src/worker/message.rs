//! Request and response messages exchanged with the geometry worker

use printviz_core::{Error, MoveGroup, RequestError, Result, Toolpath};
use printviz_settings::{ExtrusionOptions, ParameterTable, PrintParams};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::visualizer::{
    AssemblyStats, GroupFailure, LayerAssembler, TaggedGeometry, WorkspaceRender,
};

/// A unit of work for the mesh engine, tagged by `mode`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderRequest {
    /// Full layered toolpath
    Print3d {
        toolpath: Toolpath,
        #[serde(default)]
        params: Option<PrintParams>,
    },
    /// One group, for incremental layer-by-layer display
    Group {
        layer_index: usize,
        group: MoveGroup,
        #[serde(default)]
        params: Option<PrintParams>,
    },
    /// Raw coordinate stream without layering
    Workspace {
        positions: Vec<f32>,
        #[serde(default, alias = "renderMethod")]
        render_method: WorkspaceRender,
    },
}

impl RenderRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the parameter table of a layered request.
    ///
    /// Workspace requests carry no parameters and are returned unchanged.
    pub fn with_params(mut self, table: ParameterTable) -> Self {
        match &mut self {
            RenderRequest::Print3d { params, .. } | RenderRequest::Group { params, .. } => {
                *params = Some(table.into());
            }
            RenderRequest::Workspace { .. } => {}
        }
        self
    }

    pub fn shading(&self) -> ShadingMode {
        match self {
            RenderRequest::Print3d { .. } | RenderRequest::Group { .. } => ShadingMode::Print3d,
            RenderRequest::Workspace { .. } => ShadingMode::Workspace,
        }
    }
}

/// Which shader the renderer should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    Print3d,
    Workspace,
}

/// Everything the renderer needs for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub shading: ShadingMode,
    pub geometries: Vec<TaggedGeometry>,
    #[serde(default)]
    pub failures: Vec<GroupFailure>,
    #[serde(default)]
    pub stats: AssemblyStats,
}

impl RenderResponse {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn parameter_table(params: Option<PrintParams>) -> Result<ParameterTable> {
    let table = params.ok_or(RequestError::MissingParams)?.into_table();
    table.validate().map_err(|e| RequestError::InvalidRequest {
        reason: e.to_string(),
    })?;
    Ok(table)
}

/// Run a request through the engine and package the result.
///
/// Group-level problems end up in [`RenderResponse::failures`]; only
/// request-level problems are returned as errors.
pub fn package(request: RenderRequest, options: ExtrusionOptions) -> Result<RenderResponse> {
    let shading = request.shading();

    match request {
        RenderRequest::Print3d { toolpath, params } => {
            let table = parameter_table(params)?;
            let assembly = LayerAssembler::new(&table, options).assemble(&toolpath);
            Ok(RenderResponse {
                shading,
                geometries: assembly.geometries,
                failures: assembly.failures,
                stats: assembly.stats,
            })
        }
        RenderRequest::Group {
            layer_index,
            group,
            params,
        } => {
            let table = parameter_table(params)?;
            let mut response = RenderResponse {
                shading,
                geometries: Vec::with_capacity(1),
                failures: Vec::new(),
                stats: AssemblyStats::default(),
            };

            match LayerAssembler::new(&table, options).assemble_group(layer_index, &group) {
                Ok(built) => {
                    response.stats.record(&built);
                    response.geometries.push(built.geometry);
                }
                Err(error) => {
                    warn!("Skipping group on layer {}: {}", layer_index, error);
                    response.stats.record_failure();
                    response.failures.push(GroupFailure {
                        layer_index,
                        group_index: 0,
                        error,
                    });
                }
            }
            Ok(response)
        }
        RenderRequest::Workspace {
            positions,
            render_method,
        } => {
            let geometry = render_method.geometry(&positions).map_err(Error::from)?;
            Ok(RenderResponse {
                shading,
                geometries: vec![geometry],
                failures: Vec::new(),
                stats: AssemblyStats::default(),
            })
        }
    }
}
