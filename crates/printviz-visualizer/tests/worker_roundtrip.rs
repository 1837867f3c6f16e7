use printviz_core::{Layer, MoveGroup, Toolpath};
use printviz_settings::{ExtrusionOptions, ParameterTable};
use printviz_visualizer::{
    package, GeometryKind, GeometryWorker, RenderRequest, ShadingMode, WorkspaceRender,
};

fn print_request(layers: usize) -> RenderRequest {
    let toolpath = Toolpath::new(
        (0..layers)
            .map(|i| {
                let z = 0.2 * (i + 1) as f32;
                Layer::new(vec![MoveGroup::new(
                    vec![0.0, 0.0, z, 10.0, 0.0, z, 10.0, 10.0, z],
                    0,
                    1,
                )])
            })
            .collect(),
    );
    RenderRequest::Print3d {
        toolpath,
        params: Some(ParameterTable::default().into()),
    }
}

#[tokio::test]
async fn test_worker_matches_direct_packaging() {
    let worker = GeometryWorker::spawn(ExtrusionOptions::default());

    let expected = package(print_request(3), ExtrusionOptions::default()).unwrap();
    let response = worker.render(print_request(3)).await.unwrap();

    assert_eq!(response, expected);
    assert_eq!(response.shading, ShadingMode::Print3d);
    assert_eq!(response.geometries.len(), 3);

    worker.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_requests_keep_their_ids() {
    let worker = GeometryWorker::spawn(ExtrusionOptions::default());

    let mut pending = Vec::new();
    for layers in 1..=5 {
        pending.push((layers, worker.submit(print_request(layers)).await.unwrap()));
    }

    let ids: std::collections::HashSet<_> = pending.iter().map(|(_, p)| p.id()).collect();
    assert_eq!(ids.len(), 5);

    for (layers, reply) in pending {
        let response = reply.wait().await.unwrap();
        assert_eq!(response.geometries.len(), layers);
    }

    worker.shutdown().await;
}

#[tokio::test]
async fn test_dropped_reply_does_not_stall_worker() {
    let worker = GeometryWorker::spawn(ExtrusionOptions::default());

    let abandoned = worker.submit(print_request(50)).await.unwrap();
    drop(abandoned);

    let response = worker
        .render(RenderRequest::Workspace {
            positions: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            render_method: WorkspaceRender::Points,
        })
        .await
        .unwrap();
    assert_eq!(response.shading, ShadingMode::Workspace);
    assert_eq!(response.geometries[0].kind, GeometryKind::Points);

    worker.shutdown().await;
}

#[tokio::test]
async fn test_request_errors_are_returned() {
    let worker = GeometryWorker::spawn(ExtrusionOptions::default());

    let err = worker
        .render(RenderRequest::Print3d {
            toolpath: Toolpath::default(),
            params: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_request_error());

    worker.shutdown().await;
}
