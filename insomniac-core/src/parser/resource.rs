use serde::Deserialize;

use crate::types::{Header, Parameter, RequestBody};

/// Wire shape of an export file. Only the fields the runner needs are read.
#[derive(Debug, Deserialize)]
pub(super) struct RawExport {
    #[serde(default, rename = "_type")]
    pub kind: Option<String>,
    #[serde(default, rename = "__export_format")]
    pub export_format: Option<u32>,
    #[serde(default)]
    pub resources: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawResource {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default, rename = "parentId")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub body: Option<RequestBody>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, rename = "metaSortKey")]
    pub meta_sort_key: Option<f64>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
