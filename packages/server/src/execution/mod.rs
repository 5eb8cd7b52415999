//! Client side of the external execution service.

mod error;
pub mod judge0;

pub use error::ExecutionError;
pub use judge0::Judge0Client;

use async_trait::async_trait;
use serde::Serialize;

/// One test case run to request from the execution service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    /// Engine-side language id.
    pub language_id: i32,
    /// Fully assembled program.
    pub source_code: String,
    pub stdin: String,
    pub expected_output: String,
    /// Where the engine reports the result of this run.
    pub callback_url: String,
}

/// Batch code runner reporting results asynchronously via callback.
///
/// Can be used as `Arc<dyn ExecutionService>`.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Submit a batch of runs.
    ///
    /// On success returns exactly one tracking token per request, in request order.
    async fn submit_batch(
        &self,
        requests: Vec<ExecutionRequest>,
    ) -> Result<Vec<String>, ExecutionError>;
}
