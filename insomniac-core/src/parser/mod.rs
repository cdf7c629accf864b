mod resource;

use serde::de::DeserializeOwned;

use crate::error::ImportError;
use crate::types::{Environment, Request, RequestGroup, Workspace};

use resource::{RawExport, RawResource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Auto,
}

/// The resources of a single-workspace Insomnia export. Ids are kept exactly
/// as exported since dependency tags refer to them.
#[derive(Debug, Clone)]
pub struct ParsedExport {
    pub workspace: Workspace,
    pub environments: Vec<Environment>,
    pub groups: Vec<RequestGroup>,
    pub requests: Vec<Request>,
    pub format: ExportFormat,
}

const SUPPORTED_EXPORT_FORMATS: [u32; 2] = [3, 4];

pub fn parse_export_str(input: &str, format: ExportFormat) -> Result<ParsedExport, ImportError> {
    let (raw, format) = match format {
        ExportFormat::Json => (serde_json::from_str::<RawExport>(input)?, format),
        ExportFormat::Yaml => (serde_yaml::from_str::<RawExport>(input)?, format),
        ExportFormat::Auto => parse_auto::<RawExport>(input)?,
    };
    assemble(raw, format)
}

fn parse_auto<T: DeserializeOwned>(input: &str) -> Result<(T, ExportFormat), ImportError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<T>(input) {
            Ok(v) => Ok((v, ExportFormat::Json)),
            Err(e) => serde_yaml::from_str::<T>(input)
                .map(|v| (v, ExportFormat::Yaml))
                .map_err(|_| ImportError::Json(e)),
        };
    }

    match serde_yaml::from_str::<T>(input) {
        Ok(v) => Ok((v, ExportFormat::Yaml)),
        Err(e) => serde_json::from_str::<T>(input)
            .map(|v| (v, ExportFormat::Json))
            .map_err(|_| ImportError::Yaml(e)),
    }
}

fn assemble(raw: RawExport, format: ExportFormat) -> Result<ParsedExport, ImportError> {
    if raw.kind.as_deref() != Some("export") {
        return Err(ImportError::NotAnExport(raw.kind));
    }
    if let Some(version) = raw.export_format {
        if !SUPPORTED_EXPORT_FORMATS.contains(&version) {
            return Err(ImportError::UnsupportedFormat(version));
        }
    }

    let mut workspaces = Vec::new();
    let mut environments = Vec::new();
    let mut groups = Vec::new();
    let mut requests = Vec::new();

    for resource in raw.resources {
        match resource.kind.as_str() {
            "workspace" => workspaces.push(resource.into_workspace()),
            "environment" => environments.push(resource.into_environment()),
            "request_group" => groups.push(resource.into_group()),
            "request" => requests.push(resource.into_request()),
            _ => {}
        }
    }

    if workspaces.len() != 1 {
        return Err(ImportError::WorkspaceCount(workspaces.len()));
    }
    let workspace = workspaces.remove(0);

    Ok(ParsedExport {
        workspace,
        environments,
        groups,
        requests,
        format,
    })
}

impl RawResource {
    fn into_workspace(self) -> Workspace {
        Workspace {
            id: self.id,
            name: self.name.unwrap_or_default(),
            description: self.description.filter(|d| !d.is_empty()),
        }
    }

    fn into_environment(self) -> Environment {
        Environment {
            id: self.id,
            parent_id: self.parent_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            data: self.data.unwrap_or(serde_json::Value::Null),
        }
    }

    fn into_group(self) -> RequestGroup {
        RequestGroup {
            id: self.id,
            parent_id: self.parent_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            meta_sort_key: self.meta_sort_key,
        }
    }

    fn into_request(self) -> Request {
        Request {
            id: self.id,
            parent_id: self.parent_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            method: self.method.unwrap_or_else(|| "GET".to_string()),
            url: self.url.unwrap_or_default(),
            description: self.description.filter(|d| !d.is_empty()),
            body: self.body.unwrap_or_default(),
            headers: self.headers,
            parameters: self.parameters,
            meta_sort_key: self.meta_sort_key,
            dependency_ids: Vec::new(),
        }
    }
}
