//! Wire structs mirroring the VSM JSON payload field-for-field.
//!
//! These are plain serde shapes with no invariants beyond the JSON types.
//! [`crate::deserialize`] converts them into the immutable graph in
//! [`crate::types`] and back. Optional arrays stay `Option<Vec<_>>` so a
//! missing key and an empty array remain distinguishable in both directions.

use serde::{Deserialize, Serialize};

/// Top-level VSM response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VsmJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_pipeline: Option<String>,
    pub levels: Vec<LevelJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelJson {
    pub nodes: Vec<NodeJson>,
}

/// A pipeline or material vertex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeJson {
    pub id: String,
    pub locator: String,
    pub name: String,
    pub depth: u64,
    pub node_type: String,
    pub parents: Vec<String>,
    pub dependents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<Vec<InstanceJson>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_revisions: Option<Vec<MaterialRevisionJson>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceJson {
    pub label: String,
    pub locator: String,
    pub counter: u64,
    pub stages: Vec<StageJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageJson {
    pub locator: String,
    pub name: String,
    /// Seconds; may be fractional.
    pub duration: serde_json::Number,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialRevisionJson {
    pub modifications: Vec<ModificationJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModificationJson {
    pub modified_time: String,
    pub locator: String,
    pub revision: String,
    pub comment: String,
    pub user: String,
}
