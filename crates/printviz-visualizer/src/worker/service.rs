//! Background geometry worker
//!
//! Requests are queued over an mpsc channel and each one runs on the
//! blocking pool, so extrusion never stalls the async runtime or the UI.
//! Results come back over a per-request oneshot channel. A caller that
//! loses interest drops its [`PendingReply`]; the late result is discarded.

use printviz_core::{Error, Result};
use printviz_settings::ExtrusionOptions;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use super::message::{package, RenderRequest, RenderResponse};

const QUEUE_CAPACITY: usize = 64;

/// Identifier attached to every submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Req({})", &self.0.to_string()[..8])
    }
}

/// Result of one request, tagged with its id
#[derive(Debug)]
pub struct WorkerReply {
    pub id: RequestId,
    pub result: Result<RenderResponse>,
}

struct Job {
    id: RequestId,
    request: RenderRequest,
    reply: oneshot::Sender<WorkerReply>,
}

/// Receiving end for one submitted request
#[derive(Debug)]
pub struct PendingReply {
    id: RequestId,
    receiver: oneshot::Receiver<WorkerReply>,
}

impl PendingReply {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Wait for the worker to finish this request.
    pub async fn wait(self) -> Result<RenderResponse> {
        let reply = self
            .receiver
            .await
            .map_err(|_| Error::other(format!("geometry worker dropped request {}", self.id)))?;
        reply.result
    }
}

/// Spawns the geometry worker task
pub struct GeometryWorker;

impl GeometryWorker {
    /// Start a worker on the current tokio runtime.
    pub fn spawn(options: ExtrusionOptions) -> GeometryWorkerHandle {
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let task = tokio::spawn(run(receiver, options));
        debug!("Geometry worker started");
        GeometryWorkerHandle { sender, task }
    }
}

async fn run(mut receiver: mpsc::Receiver<Job>, options: ExtrusionOptions) {
    let mut jobs = JoinSet::new();

    while let Some(job) = receiver.recv().await {
        while jobs.try_join_next().is_some() {}

        if job.reply.is_closed() {
            trace!("Request {} cancelled before start", job.id);
            continue;
        }

        jobs.spawn(async move {
            let Job { id, request, reply } = job;
            let result = tokio::task::spawn_blocking(move || package(request, options))
                .await
                .unwrap_or_else(|e| Err(Error::other(format!("geometry job failed: {}", e))));

            if let Err(e) = &result {
                warn!("Request {} failed: {}", id, e);
            }
            if reply.send(WorkerReply { id, result }).is_err() {
                trace!("Request {} cancelled, discarding result", id);
            }
        });
    }

    while jobs.join_next().await.is_some() {}
    debug!("Geometry worker stopped");
}

/// Handle used to submit work and stop the worker
pub struct GeometryWorkerHandle {
    sender: mpsc::Sender<Job>,
    task: JoinHandle<()>,
}

impl GeometryWorkerHandle {
    /// Queue a request.
    pub async fn submit(&self, request: RenderRequest) -> Result<PendingReply> {
        let id = RequestId::new();
        let (reply, receiver) = oneshot::channel();

        self.sender
            .send(Job { id, request, reply })
            .await
            .map_err(|_| Error::other("geometry worker is not running"))?;

        trace!("Submitted request {}", id);
        Ok(PendingReply { id, receiver })
    }

    /// Submit a request and wait for its result.
    pub async fn render(&self, request: RenderRequest) -> Result<RenderResponse> {
        self.submit(request).await?.wait().await
    }

    /// Stop accepting work and wait for in-flight requests to finish.
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(e) = self.task.await {
            warn!("Geometry worker task ended abnormally: {}", e);
        }
    }
}
