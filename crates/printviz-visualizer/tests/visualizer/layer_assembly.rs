use printviz_core::constants::TRAVEL_TYPE_CODE;
use printviz_core::{GeometryError, Layer, MoveGroup, Rgb, Toolpath};
use printviz_settings::{ExtrusionOptions, ParameterTable, PrintParams};
use printviz_visualizer::{GeometryKind, LayerAssembler, MeshCollection};

fn perimeter(z: f32) -> Vec<f32> {
    vec![
        0.0, 0.0, z, 20.0, 0.0, z, 20.0, 20.0, z, 0.0, 20.0, z, 0.0, 0.0, z,
    ]
}

fn two_layer_toolpath() -> Toolpath {
    Toolpath::new(vec![
        Layer::new(vec![
            MoveGroup::new(perimeter(0.3), 0, 1),
            MoveGroup::new(vec![0.0, 0.0, 0.3, 5.0, 5.0, 0.3], 0, TRAVEL_TYPE_CODE),
        ]),
        Layer::new(vec![
            MoveGroup::new(perimeter(0.5), 1, 1),
            MoveGroup::new(vec![1.0, 2.0, 3.0, 4.0], 1, 1),
            MoveGroup::new(perimeter(0.5), 0, 2).with_breaks(vec![1]),
        ]),
    ])
}

#[test]
fn test_malformed_group_does_not_affect_siblings() {
    let table = ParameterTable::default();
    let assembly = LayerAssembler::new(&table, ExtrusionOptions::default())
        .assemble(&two_layer_toolpath());

    assert_eq!(assembly.geometries.len(), 4);
    assert_eq!(assembly.failures.len(), 1);
    assert_eq!(assembly.failures[0].layer_index, 1);
    assert_eq!(assembly.failures[0].group_index, 1);
    assert_eq!(
        assembly.failures[0].error,
        GeometryError::MalformedBuffer { len: 4 }
    );

    let layers: Vec<usize> = assembly
        .geometries
        .iter()
        .map(|g| g.material.layer_index)
        .collect();
    assert_eq!(layers, vec![0, 0, 1, 1]);

    let kinds: Vec<GeometryKind> = assembly.geometries.iter().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![
            GeometryKind::Ribbon,
            GeometryKind::LineSet,
            GeometryKind::Ribbon,
            GeometryKind::Ribbon
        ]
    );

    for geometry in &assembly.geometries {
        assert!(geometry.buffer.validate().is_ok());
    }
}

#[test]
fn test_assembly_is_idempotent() {
    let table = ParameterTable::default();
    let assembler = LayerAssembler::new(&table, ExtrusionOptions::default());
    let toolpath = two_layer_toolpath();
    assert_eq!(assembler.assemble(&toolpath), assembler.assemble(&toolpath));
}

#[test]
fn test_first_layer_uses_first_layer_params() {
    let table = ParameterTable::default();
    let assembler = LayerAssembler::new(&table, ExtrusionOptions::default());
    let group = MoveGroup::new(vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0], 0, 1);

    let first = assembler.assemble_group(0, &group).unwrap();
    let later = assembler.assemble_group(5, &group).unwrap();
    let forced = assembler
        .assemble_group(5, &group.clone().with_first_layer(true))
        .unwrap();

    // Left corner (vertex 3) sits at half the line width; top (vertex 0) at half the height
    let half_width = |g: &printviz_visualizer::GroupGeometry| g.geometry.buffer.vertices[10];
    let half_height = |g: &printviz_visualizer::GroupGeometry| g.geometry.buffer.vertices[2];

    assert!((half_width(&first) - 0.225).abs() < 1e-6);
    assert!((half_height(&first) - 0.15).abs() < 1e-6);
    assert!((half_width(&later) - 0.2).abs() < 1e-6);
    assert!((half_height(&later) - 0.1).abs() < 1e-6);
    assert_eq!(forced.geometry.buffer, first.geometry.buffer);
}

#[test]
fn test_unknown_tool_falls_back() {
    let table = ParameterTable::default();
    let toolpath = Toolpath::new(vec![Layer::new(vec![MoveGroup::new(perimeter(0.3), 42, 1)])]);
    let assembly = LayerAssembler::new(&table, ExtrusionOptions::default()).assemble(&toolpath);

    assert!(assembly.failures.is_empty());
    assert_eq!(assembly.stats.unknown_tools, 1);
    let material = assembly.geometries[0].material;
    assert_eq!(material.tool_code, 42);
    assert_eq!(material.tool_color, Rgb::WHITE);
}

#[test]
fn test_legacy_params_drive_assembly() {
    let params: PrintParams = serde_json::from_str(
        r##"{
            "layerHeight": 0.1,
            "layerHeight0": 0.2,
            "extruderLlineWidth": 0.3,
            "extruderLlineWidth0": 0.3,
            "extruderRlineWidth": 0.8,
            "extruderRlineWidth0": 0.8,
            "extruderColors": { "toolColor0": "#00ff00", "toolColor1": "#ff0000" }
        }"##,
    )
    .unwrap();
    let table = params.into_table();
    let assembler = LayerAssembler::new(&table, ExtrusionOptions::default());

    let group = MoveGroup::new(vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0], 1, 1);
    let built = assembler.assemble_group(3, &group).unwrap();
    assert_eq!(built.geometry.material.color, Rgb::new(1.0, 0.0, 0.0));
    assert!((built.geometry.buffer.vertices[10] - 0.4).abs() < 1e-6);
}

#[test]
fn test_empty_groups_keep_their_slot() {
    let table = ParameterTable::default();
    let toolpath = Toolpath::new(vec![Layer::new(vec![
        MoveGroup::new(vec![1.0, 1.0, 1.0], 0, 1),
        MoveGroup::new(Vec::new(), 0, TRAVEL_TYPE_CODE),
    ])]);
    let assembly = LayerAssembler::new(&table, ExtrusionOptions::default()).assemble(&toolpath);

    assert_eq!(assembly.geometries.len(), 2);
    assert!(assembly.geometries.iter().all(|g| g.buffer.is_empty()));
    assert_eq!(assembly.geometries[0].buffer.indices, Some(Vec::new()));
}

#[test]
fn test_stats_match_render_meshes() {
    let table = ParameterTable::default();
    let assembly = LayerAssembler::new(&table, ExtrusionOptions::default())
        .assemble(&two_layer_toolpath());
    let meshes = MeshCollection::from_geometries(&assembly.geometries);

    assert_eq!(meshes.total_vertices(), assembly.stats.vertices);
    assert_eq!(meshes.total_triangles(), assembly.stats.triangles);
    assert_eq!(assembly.stats.groups, 5);
    assert_eq!(assembly.stats.failed_groups, 1);
}
