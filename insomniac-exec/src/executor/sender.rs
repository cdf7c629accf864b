use async_trait::async_trait;
use insomniac_store::ResponsePatch;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SendError {
    #[error("request not found: {0}")]
    UnknownRequest(String),
    #[error("invalid method {0:?}")]
    InvalidMethod(String),
    #[error("invalid url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl SendError {
    /// `Internal` errors abort the whole run; everything else is reported as
    /// an `ERROR` record for that request only.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SendError::Internal(_))
    }
}

/// Performs the actual network call for one request.
///
/// No timeout or retry is applied around `send`.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, request_id: &str, environment_id: &str)
        -> Result<ResponsePatch, SendError>;
}
