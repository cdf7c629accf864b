#![forbid(unsafe_code)]

pub mod memory;
pub mod store;

pub use crate::memory::{MemoryCatalog, MemoryResponseStore};
pub use crate::store::{
    find_environments_by_name, Catalog, ResponseHeader, ResponsePatch, ResponseStore,
    StoreError, StoredResponse,
};
