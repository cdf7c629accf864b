mod catalog;
mod responses;

pub use catalog::MemoryCatalog;
pub use responses::MemoryResponseStore;
