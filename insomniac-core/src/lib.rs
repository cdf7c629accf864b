#![forbid(unsafe_code)]

pub mod dependency;
pub mod error;
pub mod parser;
pub mod types;

pub use crate::dependency::{extract_tags, request_dependency_ids};
pub use crate::error::ImportError;
pub use crate::parser::{parse_export_str, ExportFormat, ParsedExport};
pub use crate::types::{
    Environment, Header, Parameter, Request, RequestBody, RequestGroup, Workspace,
};
