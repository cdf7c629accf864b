mod resolve;
mod trait_store;
mod types;

pub use resolve::find_environments_by_name;
pub use trait_store::{Catalog, ResponseStore, StoreError};
pub use types::{ResponseHeader, ResponsePatch, StoredResponse};
