use serde::{Deserialize, Serialize};

/// A named set of variables. Environments nest: the base environment is
/// parented to the workspace and sub-environments are parented to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub parent_id: String,
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
}
