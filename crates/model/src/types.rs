//! The parsed value stream map graph.
//!
//! Every type here is immutable once built: fields are private and only
//! [`crate::deserialize`] constructs them. Ownership is strictly
//! tree-shaped (`Vsm` → `Level` → `Node` → history). Graph edges between
//! nodes are plain id lists, never references, so diamond dependencies
//! cannot introduce cycles.

use std::fmt;

// ── Modification ────────────────────────────────────────────────────

/// A single change-set on a material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    user: String,
    revision: String,
    modified_time: String,
    comment: String,
    locator: String,
}

impl Modification {
    pub(crate) fn new(
        user: String,
        revision: String,
        modified_time: String,
        comment: String,
        locator: String,
    ) -> Self {
        Modification {
            user,
            revision,
            modified_time,
            comment,
            locator,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Opaque revision identifier (commit hash, changelist number, ...).
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Passed through as sent; may be relative ("about 3 hours ago") or ISO.
    pub fn modified_time(&self) -> &str {
        &self.modified_time
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }
}

// ── MaterialRevision ────────────────────────────────────────────────

/// The modifications of one material revision, newest first as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRevision {
    modifications: Vec<Modification>,
}

impl MaterialRevision {
    pub(crate) fn new(modifications: Vec<Modification>) -> Self {
        MaterialRevision { modifications }
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// The newest modification, if any.
    pub fn latest(&self) -> Option<&Modification> {
        self.modifications.first()
    }
}

// ── Stage ───────────────────────────────────────────────────────────

/// Stage result as reported by the server.
///
/// Values the client does not recognise are kept verbatim in
/// [`StageStatus::Unknown`], so a newer server never breaks parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageStatus {
    Building,
    Failing,
    Passed,
    Failed,
    Cancelled,
    Unknown(String),
}

impl StageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StageStatus::Building => "Building",
            StageStatus::Failing => "Failing",
            StageStatus::Passed => "Passed",
            StageStatus::Failed => "Failed",
            StageStatus::Cancelled => "Cancelled",
            StageStatus::Unknown(raw) => raw,
        }
    }

    /// True while the stage is still running.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, StageStatus::Building | StageStatus::Failing)
    }

}

impl From<&str> for StageStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "Building" => StageStatus::Building,
            "Failing" => StageStatus::Failing,
            "Passed" => StageStatus::Passed,
            "Failed" => StageStatus::Failed,
            "Cancelled" => StageStatus::Cancelled,
            other => StageStatus::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stage of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    name: String,
    status: StageStatus,
    duration: serde_json::Number,
    locator: String,
}

impl Stage {
    pub(crate) fn new(
        name: String,
        status: StageStatus,
        duration: serde_json::Number,
        locator: String,
    ) -> Self {
        Stage {
            name,
            status,
            duration,
            locator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &StageStatus {
        &self.status
    }

    /// Duration in seconds, exactly as sent (integral or fractional, never negative).
    pub fn duration(&self) -> &serde_json::Number {
        &self.duration
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration.as_f64().unwrap_or_default()
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }
}

// ── Instance ────────────────────────────────────────────────────────

/// One run of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    label: String,
    counter: u64,
    locator: String,
    stages: Vec<Stage>,
}

impl Instance {
    pub(crate) fn new(label: String, counter: u64, locator: String, stages: Vec<Stage>) -> Self {
        Instance {
            label,
            counter,
            locator,
            stages,
        }
    }

    /// Display label; may be `"unknown"`. Use [`Instance::counter`] to identify the run.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Authoritative run number, always ≥ 1.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The last stage in run order.
    pub fn latest_stage(&self) -> Option<&Stage> {
        self.stages.last()
    }
}

// ── Node ────────────────────────────────────────────────────────────

/// A vertex of the dependency graph: a pipeline or a material.
///
/// `instances` and `material_revisions` are `None` when the server omitted
/// them and `Some(vec![])` when it sent an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: String,
    name: String,
    node_type: String,
    locator: String,
    depth: u64,
    parents: Vec<String>,
    dependents: Vec<String>,
    instances: Option<Vec<Instance>>,
    material_revisions: Option<Vec<MaterialRevision>>,
}

impl Node {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        name: String,
        node_type: String,
        locator: String,
        depth: u64,
        parents: Vec<String>,
        dependents: Vec<String>,
        instances: Option<Vec<Instance>>,
        material_revisions: Option<Vec<MaterialRevision>>,
    ) -> Self {
        Node {
            id,
            name,
            node_type,
            locator,
            depth,
            parents,
            dependents,
            instances,
            material_revisions,
        }
    }

    /// Unique within one response only.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free text, e.g. `"GIT"` for a material or a pipeline tag.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Layer hint from the server.
    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn dependents(&self) -> &[String] {
        &self.dependents
    }

    pub fn instances(&self) -> Option<&[Instance]> {
        self.instances.as_deref()
    }

    pub fn material_revisions(&self) -> Option<&[MaterialRevision]> {
        self.material_revisions.as_deref()
    }

    /// The node carries at least one material revision.
    pub fn is_material(&self) -> bool {
        self.material_revisions.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// The node carries at least one pipeline run.
    pub fn is_pipeline(&self) -> bool {
        self.instances.as_ref().is_some_and(|i| !i.is_empty())
    }
}

// ── Level ───────────────────────────────────────────────────────────

/// One rank of the dependency graph, as layered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    nodes: Vec<Node>,
}

impl Level {
    pub(crate) fn new(nodes: Vec<Node>) -> Self {
        Level { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ── Current ─────────────────────────────────────────────────────────

/// The entity the map is centered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Current {
    name: String,
    is_pipeline: bool,
}

impl Current {
    pub(crate) fn new(name: String, is_pipeline: bool) -> Self {
        Current { name, is_pipeline }
    }

    /// Pipeline name, or material name/URL.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_pipeline(&self) -> bool {
        self.is_pipeline
    }
}

// ── Vsm ─────────────────────────────────────────────────────────────

/// A parsed value stream map.
///
/// Alongside the resolved [`Current`], the two top-level `current_*` fields
/// are kept as received so the map can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vsm {
    current: Current,
    current_pipeline: Option<String>,
    current_material: Option<String>,
    levels: Vec<Level>,
}

impl Vsm {
    pub(crate) fn new(
        current: Current,
        current_pipeline: Option<String>,
        current_material: Option<String>,
        levels: Vec<Level>,
    ) -> Self {
        Vsm {
            current,
            current_pipeline,
            current_material,
            levels,
        }
    }

    pub fn current(&self) -> &Current {
        &self.current
    }

    /// `current_pipeline` as received; `None` when absent or null.
    pub fn current_pipeline_field(&self) -> Option<&str> {
        self.current_pipeline.as_deref()
    }

    /// `current_material` as received; `None` when absent or null.
    pub fn current_material_field(&self) -> Option<&str> {
        self.current_material.as_deref()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// All nodes, level by level, in server order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.levels.iter().flat_map(|level| level.nodes.iter())
    }

    pub fn node_count(&self) -> usize {
        self.levels.iter().map(|level| level.nodes.len()).sum()
    }

    /// First node with the given id.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes().find(|node| node.id == id)
    }
}
