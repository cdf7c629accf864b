use async_trait::async_trait;
use insomniac_core::{Environment, Request, RequestGroup, Workspace};

use crate::store::types::{ResponsePatch, StoredResponse};

/// Read access to the imported workspace: environments, folders and
/// requests, addressed by id or parent id.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn workspace(&self) -> Result<Workspace, StoreError>;

    async fn environments_by_parent(&self, parent_id: &str)
        -> Result<Vec<Environment>, StoreError>;

    /// First group with exactly this name, in import order.
    async fn request_group_by_name(&self, name: &str) -> Result<Option<RequestGroup>, StoreError>;

    async fn request_groups(&self) -> Result<Vec<RequestGroup>, StoreError>;

    /// Direct children of `parent_id`, ordered by sort key then import order.
    async fn requests_by_parent(&self, parent_id: &str) -> Result<Vec<Request>, StoreError>;

    async fn get_request(&self, id: &str) -> Result<Option<Request>, StoreError>;
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
    async fn create(&self, patch: ResponsePatch) -> Result<StoredResponse, StoreError>;

    async fn find_by_request(&self, request_id: &str) -> Result<Vec<StoredResponse>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Other(String),
}
