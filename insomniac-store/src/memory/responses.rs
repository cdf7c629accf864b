use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::store::{ResponsePatch, ResponseStore, StoreError, StoredResponse};

#[derive(Debug, Default)]
pub struct MemoryResponseStore {
    responses: Mutex<Vec<StoredResponse>>,
}

impl MemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.responses.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.responses.lock().await.is_empty()
    }
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn create(&self, patch: ResponsePatch) -> Result<StoredResponse, StoreError> {
        let stored = StoredResponse {
            id: format!("res_{}", Uuid::new_v4().simple()),
            created: Utc::now(),
            patch,
        };
        self.responses.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_request(&self, request_id: &str) -> Result<Vec<StoredResponse>, StoreError> {
        Ok(self
            .responses
            .lock()
            .await
            .iter()
            .filter(|r| r.request_id() == request_id)
            .cloned()
            .collect())
    }
}
