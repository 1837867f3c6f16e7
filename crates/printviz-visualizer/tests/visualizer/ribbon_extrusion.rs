use printviz_core::{BreakSet, Path, Point3};
use printviz_settings::{DegeneratePolicy, ExtrusionParams};
use printviz_visualizer::RibbonExtruder;
use proptest::prelude::*;

fn extruder() -> RibbonExtruder {
    RibbonExtruder::new(
        ExtrusionParams {
            width: 0.45,
            height: 0.3,
        },
        DegeneratePolicy::Skip,
    )
}

#[test]
fn test_square_perimeter() {
    let path = Path::decode(&[
        0.0, 0.0, 0.3, 10.0, 0.0, 0.3, 10.0, 10.0, 0.3, 0.0, 10.0, 0.3, 0.0, 0.0, 0.3,
    ])
    .unwrap();
    let mesh = extruder().extrude(&path, &BreakSet::default()).unwrap();

    assert_eq!(mesh.buffer.vertex_count(), 32);
    assert_eq!(mesh.buffer.triangle_count(), 8 * 4 + 4);
    assert!(mesh.buffer.validate().is_ok());

    // Ribbon sits on the path: top at z + h/2, bottom at z - h/2
    let zs: Vec<f32> = mesh.buffer.vertices.chunks(3).map(|v| v[2]).collect();
    let top = zs.iter().cloned().fold(f32::MIN, f32::max);
    let bottom = zs.iter().cloned().fold(f32::MAX, f32::min);
    assert!((top - 0.45).abs() < 1e-6);
    assert!((bottom - 0.15).abs() < 1e-6);
}

#[test]
fn test_every_segment_broken() {
    let path = Path::from_points(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ]);
    let breaks = BreakSet::for_path(&[0, 1], path.len());
    let mesh = extruder().extrude(&path, &breaks).unwrap();
    assert!(mesh.buffer.is_empty());
    assert_eq!(mesh.buffer.triangle_count(), 0);
}

/// Expected (vertices, triangles) from counting gaps and runs.
fn expected_counts(points: &[[i32; 3]], breaks: &BreakSet) -> (usize, usize) {
    let gaps: Vec<bool> = points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| breaks.contains(i) || pair[0] == pair[1])
        .collect();

    let drawn = gaps.iter().filter(|g| !**g).count();
    let runs = gaps
        .iter()
        .enumerate()
        .filter(|(i, g)| !**g && (*i == 0 || gaps[i - 1]))
        .count();

    (drawn * 8, drawn * 8 + runs * 4)
}

proptest! {
    #[test]
    fn prop_buffers_well_formed(
        points in proptest::collection::vec(prop::array::uniform3(-20i32..20), 0..40),
        raw_breaks in proptest::collection::vec(0usize..45, 0..10),
    ) {
        let coords: Vec<f32> = points
            .iter()
            .flat_map(|p| p.iter().map(|c| *c as f32 * 0.5))
            .collect();
        let path = Path::decode(&coords).unwrap();
        let breaks = BreakSet::for_path(&raw_breaks, path.len());

        let mesh = extruder().extrude(&path, &breaks).unwrap();
        let buffer = &mesh.buffer;

        prop_assert!(buffer.validate().is_ok());
        prop_assert!(buffer.vertices.iter().all(|v| v.is_finite()));
        prop_assert_eq!(
            buffer.normals.as_ref().map(|n| n.len()),
            Some(buffer.vertices.len())
        );

        let (vertices, triangles) = expected_counts(&points, &breaks);
        prop_assert_eq!(buffer.vertex_count(), vertices);
        prop_assert_eq!(buffer.triangle_count(), triangles);
    }

    #[test]
    fn prop_extrusion_is_deterministic(
        points in proptest::collection::vec(prop::array::uniform3(-100.0f32..100.0), 2..20),
    ) {
        let coords: Vec<f32> = points.iter().flat_map(|p| p.iter().copied()).collect();
        let path = Path::decode(&coords).unwrap();
        let a = extruder().extrude(&path, &BreakSet::default()).unwrap();
        let b = extruder().extrude(&path, &BreakSet::default()).unwrap();
        prop_assert_eq!(a, b);
    }
}
