//! Layer assembly
//!
//! Walks a toolpath layer by layer and group by group, dispatching each
//! group to the ribbon extruder or the travel linearizer and tagging the
//! result for the shader. A failing group is recorded and skipped; its
//! siblings are unaffected.

use printviz_core::{BreakSet, GeometryError, MoveGroup, MoveKind, Rgb, Toolpath};
use printviz_settings::{ExtrusionOptions, ParameterTable, ResolvedTool};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::geometry::{GeometryKind, MaterialTags, TaggedGeometry};
use super::ribbon::RibbonExtruder;
use super::travel::TravelLinearizer;

/// A group that could not be turned into geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupFailure {
    pub layer_index: usize,
    pub group_index: usize,
    pub error: GeometryError,
}

/// Counters gathered while assembling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssemblyStats {
    pub groups: usize,
    pub ribbons: usize,
    pub line_sets: usize,
    pub failed_groups: usize,
    pub vertices: usize,
    pub triangles: usize,
    /// Break indices dropped for not addressing a segment
    pub ignored_breaks: usize,
    pub skipped_degenerate: usize,
    /// Groups whose tool code fell back to the default profile
    pub unknown_tools: usize,
}

impl AssemblyStats {
    pub(crate) fn record(&mut self, group: &GroupGeometry) {
        self.groups += 1;
        match group.geometry.kind {
            GeometryKind::Ribbon => self.ribbons += 1,
            GeometryKind::LineSet => self.line_sets += 1,
            GeometryKind::Points | GeometryKind::LineStrip => {}
        }
        self.vertices += group.geometry.buffer.vertex_count();
        self.triangles += group.geometry.buffer.triangle_count();
        self.ignored_breaks += group.ignored_breaks;
        self.skipped_degenerate += group.skipped_degenerate;
        if group.used_fallback {
            self.unknown_tools += 1;
        }
    }

    pub(crate) fn record_failure(&mut self) {
        self.groups += 1;
        self.failed_groups += 1;
    }
}

/// Geometry for a single move group plus what was recovered along the way
#[derive(Debug, Clone, PartialEq)]
pub struct GroupGeometry {
    pub geometry: TaggedGeometry,
    pub ignored_breaks: usize,
    pub skipped_degenerate: usize,
    pub used_fallback: bool,
}

/// Output of a full toolpath assembly
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assembly {
    /// Geometry in layer order, then group order
    pub geometries: Vec<TaggedGeometry>,
    pub failures: Vec<GroupFailure>,
    pub stats: AssemblyStats,
}

/// Builds tagged geometry from toolpaths against a parameter table
#[derive(Debug, Clone, Copy)]
pub struct LayerAssembler<'a> {
    params: &'a ParameterTable,
    options: ExtrusionOptions,
}

impl<'a> LayerAssembler<'a> {
    pub fn new(params: &'a ParameterTable, options: ExtrusionOptions) -> Self {
        Self { params, options }
    }

    /// Assemble every group of every layer.
    pub fn assemble(&self, toolpath: &Toolpath) -> Assembly {
        let mut assembly = Assembly {
            geometries: Vec::with_capacity(toolpath.group_count()),
            ..Default::default()
        };

        for (layer_index, layer) in toolpath.layers.iter().enumerate() {
            for (group_index, group) in layer.groups.iter().enumerate() {
                match self.assemble_group(layer_index, group) {
                    Ok(built) => {
                        assembly.stats.record(&built);
                        assembly.geometries.push(built.geometry);
                    }
                    Err(error) => {
                        warn!(
                            "Skipping group {} of layer {}: {}",
                            group_index, layer_index, error
                        );
                        assembly.stats.record_failure();
                        assembly.failures.push(GroupFailure {
                            layer_index,
                            group_index,
                            error,
                        });
                    }
                }
            }
        }

        debug!(
            "Assembled {} layers: {} ribbons, {} line sets, {} failed, {} vertices, {} triangles",
            toolpath.layers.len(),
            assembly.stats.ribbons,
            assembly.stats.line_sets,
            assembly.stats.failed_groups,
            assembly.stats.vertices,
            assembly.stats.triangles
        );

        assembly
    }

    /// Assemble one group in isolation.
    ///
    /// Used for incremental visualization where layers arrive one at a time.
    pub fn assemble_group(
        &self,
        layer_index: usize,
        group: &MoveGroup,
    ) -> Result<GroupGeometry, GeometryError> {
        let path = group.decode_path()?;
        let breaks = BreakSet::for_path(&group.breaks, path.len());
        let first_layer = group.is_first_layer(layer_index);
        let (tool, used_fallback) = self.resolve_tool(group.tool_code, first_layer)?;

        let move_kind = group.kind();
        let (buffer, skipped_degenerate) = match move_kind {
            MoveKind::Travel => (TravelLinearizer::linearize(&path, &breaks), 0),
            MoveKind::Extrude => {
                let mesh = RibbonExtruder::new(tool.params, self.options.degenerate_policy)
                    .extrude(&path, &breaks)?;
                (mesh.buffer, mesh.skipped_degenerate)
            }
        };

        let material = MaterialTags {
            tool_code: group.tool_code,
            type_code: group.type_code,
            layer_index,
            color: self.group_color(group, &tool),
            tool_color: tool.color,
        };

        Ok(GroupGeometry {
            geometry: TaggedGeometry {
                kind: GeometryKind::for_move(move_kind),
                buffer,
                material,
            },
            ignored_breaks: breaks.ignored(),
            skipped_degenerate,
            used_fallback,
        })
    }

    fn resolve_tool(
        &self,
        tool_code: u32,
        first_layer: bool,
    ) -> Result<(ResolvedTool, bool), GeometryError> {
        match self.params.resolve(tool_code, first_layer) {
            Ok(tool) => Ok((tool, false)),
            Err(err @ GeometryError::UnknownToolCode { .. }) => {
                warn!("{}, using the fallback profile", err);
                Ok((self.params.resolve_fallback(first_layer)?, true))
            }
            Err(err) => Err(err),
        }
    }

    fn group_color(&self, group: &MoveGroup, tool: &ResolvedTool) -> Rgb {
        match group.color.as_ref().map(|c| c.resolve()) {
            Some(Ok(color)) => color,
            Some(Err(err)) => {
                warn!("{}, using tool {} color", err, group.tool_code);
                tool.color
            }
            None => tool.color,
        }
    }
}
