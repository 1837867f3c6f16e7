use printviz_core::{BreakSet, MoveKind, Rgb, Toolpath};

const TWO_LAYER_JSON: &str = r#"[
    [
        { "positions": [0, 0, 0.2, 10, 0, 0.2, 10, 10, 0.2], "breaks": [1], "tool_code": 0, "type_code": 1 },
        { "positions": [10, 10, 0.2, 0, 0, 0.2], "tool_code": 0, "type_code": 7, "color": 16777215 }
    ],
    [
        { "positions": [0, 0, 0.4, 5, 5, 0.4], "tool_code": 1, "type_code": 2, "color": [0.1, 0.2, 0.3], "is_first_layer": false }
    ]
]"#;

#[test]
fn test_two_layer_toolpath_parses() {
    let toolpath: Toolpath = serde_json::from_str(TWO_LAYER_JSON).unwrap();
    assert_eq!(toolpath.layers.len(), 2);
    assert_eq!(toolpath.group_count(), 3);

    let first = &toolpath.layers[0].groups[0];
    assert_eq!(first.kind(), MoveKind::Extrude);
    assert!(first.is_first_layer(0));
    let path = first.decode_path().unwrap();
    let breaks = BreakSet::for_path(&first.breaks, path.len());
    assert!(breaks.contains(1));

    let travel = &toolpath.layers[0].groups[1];
    assert_eq!(travel.kind(), MoveKind::Travel);
    assert!(travel.breaks.is_empty());
    assert_eq!(travel.color.as_ref().unwrap().resolve().unwrap(), Rgb::WHITE);

    let second = &toolpath.layers[1].groups[0];
    assert!(!second.is_first_layer(1));
    assert_eq!(
        second.color.as_ref().unwrap().resolve().unwrap(),
        Rgb::new(0.1, 0.2, 0.3)
    );
}

#[test]
fn test_toolpath_serialization_round_trip() {
    let toolpath: Toolpath = serde_json::from_str(TWO_LAYER_JSON).unwrap();
    let json = serde_json::to_string(&toolpath).unwrap();
    let again: Toolpath = serde_json::from_str(&json).unwrap();
    assert_eq!(toolpath, again);
}
