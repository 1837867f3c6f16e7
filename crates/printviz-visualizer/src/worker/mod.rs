//! Off-thread geometry processing
//!
//! - Request/response messages and the synchronous `package` entry point (message)
//! - The tokio-based worker that runs requests in the background (service)

pub mod message;
pub mod service;

pub use message::{package, RenderRequest, RenderResponse, ShadingMode};
pub use service::{GeometryWorker, GeometryWorkerHandle, PendingReply, RequestId, WorkerReply};
