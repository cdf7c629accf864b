use std::sync::Arc;

use insomniac_store::StoreError;

use crate::executor::sender::SendError;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("environment not found: {name} ({matches} environments match; exactly one is required)")]
    EnvironmentNotFound { name: String, matches: usize },
    #[error("request group not found: {0}")]
    GroupNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures outside the ordinary send-failure path. Any of these ends the run.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("unexpected error sending request {request_id}: {source}")]
    Send {
        request_id: String,
        #[source]
        source: SendError,
    },
    #[error("failed to store response for request {request_id}: {source}")]
    Store {
        request_id: String,
        #[source]
        source: StoreError,
    },
    #[error("request task failed: {0}")]
    LegPanicked(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RunError {
    #[error("run aborted: {0}")]
    Fatal(Arc<FatalError>),
    #[error("event bus closed before every request reported")]
    BusClosed,
}
