use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("document is not an Insomnia export (expected _type: export, found {0:?})")]
    NotAnExport(Option<String>),
    #[error("unsupported export format version {0} (supported: 3, 4)")]
    UnsupportedFormat(u32),
    #[error("expected exactly one workspace in the export, found {0}")]
    WorkspaceCount(usize),
}
