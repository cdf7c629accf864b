use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub name: String,
    pub value: String,
}

/// What a sender hands back for one request; persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePatch {
    pub request_id: String,
    pub environment_id: String,
    pub url: String,
    pub status_code: u16,
    pub status_message: String,
    pub headers: Vec<ResponseHeader>,
    pub body: String,
    pub body_size: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResponse {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(flatten)]
    pub patch: ResponsePatch,
}

impl StoredResponse {
    pub fn status_code(&self) -> u16 {
        self.patch.status_code
    }

    pub fn request_id(&self) -> &str {
        &self.patch.request_id
    }
}
