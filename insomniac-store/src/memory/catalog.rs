use std::cmp::Ordering;

use async_trait::async_trait;
use insomniac_core::{Environment, ParsedExport, Request, RequestGroup, Workspace};

use crate::store::{Catalog, StoreError};

/// Catalog over one parsed export, held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    workspace: Workspace,
    environments: Vec<Environment>,
    groups: Vec<RequestGroup>,
    requests: Vec<Request>,
}

impl MemoryCatalog {
    pub fn new(
        workspace: Workspace,
        environments: Vec<Environment>,
        groups: Vec<RequestGroup>,
        requests: Vec<Request>,
    ) -> Self {
        Self {
            workspace,
            environments,
            groups,
            requests,
        }
    }
}

impl From<ParsedExport> for MemoryCatalog {
    fn from(parsed: ParsedExport) -> Self {
        Self::new(
            parsed.workspace,
            parsed.environments,
            parsed.groups,
            parsed.requests,
        )
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn workspace(&self) -> Result<Workspace, StoreError> {
        Ok(self.workspace.clone())
    }

    async fn environments_by_parent(
        &self,
        parent_id: &str,
    ) -> Result<Vec<Environment>, StoreError> {
        Ok(self
            .environments
            .iter()
            .filter(|e| e.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn request_group_by_name(&self, name: &str) -> Result<Option<RequestGroup>, StoreError> {
        Ok(self.groups.iter().find(|g| g.name == name).cloned())
    }

    async fn request_groups(&self) -> Result<Vec<RequestGroup>, StoreError> {
        Ok(self.groups.clone())
    }

    async fn requests_by_parent(&self, parent_id: &str) -> Result<Vec<Request>, StoreError> {
        let mut children: Vec<Request> = self
            .requests
            .iter()
            .filter(|r| r.parent_id == parent_id)
            .cloned()
            .collect();
        // Stable: equal keys keep import order, unkeyed requests go last.
        children.sort_by(|a, b| compare_sort_keys(a.meta_sort_key, b.meta_sort_key));
        Ok(children)
    }

    async fn get_request(&self, id: &str) -> Result<Option<Request>, StoreError> {
        Ok(self.requests.iter().find(|r| r.id == id).cloned())
    }
}

fn compare_sort_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
