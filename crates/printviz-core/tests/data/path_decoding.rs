use printviz_core::{GeometryError, Path, Point3};
use proptest::prelude::*;

#[test]
fn test_decode_then_flatten_is_identity() {
    let buffer = vec![0.5, -1.25, 3.0, 10.0, 20.0, 30.0, -0.0, 1e-7, 4096.5];
    let path = Path::decode(&buffer).unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path.flatten(), buffer);
}

#[test]
fn test_decode_reports_buffer_length() {
    match Path::decode(&[1.0; 8]) {
        Err(GeometryError::MalformedBuffer { len }) => assert_eq!(len, 8),
        other => panic!("expected malformed buffer, got {:?}", other),
    }
}

#[test]
fn test_from_points_segments() {
    let path = Path::from_points(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ]);
    assert_eq!(path.segment_count(), 2);
    assert_eq!(
        path.segment(1),
        Some((Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)))
    );
    assert_eq!(path.segment(2), None);
}

proptest! {
    #[test]
    fn prop_round_trip(points in proptest::collection::vec(prop::array::uniform3(-1.0e4f32..1.0e4), 0..64)) {
        let buffer: Vec<f32> = points.iter().flat_map(|p| p.iter().copied()).collect();
        let path = Path::decode(&buffer).unwrap();
        prop_assert_eq!(path.len(), points.len());
        prop_assert_eq!(path.flatten(), buffer);
    }

    #[test]
    fn prop_misaligned_buffers_rejected(len in 0usize..200) {
        let buffer = vec![0.0f32; len];
        let result = Path::decode(&buffer);
        prop_assert_eq!(result.is_ok(), len % 3 == 0);
    }
}
