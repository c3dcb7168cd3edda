//! Conversion between VSM JSON payloads and the typed graph.
//!
//! The main entry point is [`parse_vsm`], which takes a
//! `&serde_json::Value` and produces a [`Vsm`]. [`to_vsm_json`] goes the
//! other way. Neither reorders, filters, or deduplicates anything.

use serde::Deserialize;

use crate::error::VsmError;
use crate::json::*;
use crate::types::*;

/// Parse a VSM payload into a [`Vsm`].
///
/// Fails on the first missing or wrong-typed field, on an instance counter
/// below 1, and when the current entity is ambiguous or absent.
pub fn parse_vsm(payload: &serde_json::Value) -> Result<Vsm, VsmError> {
    let wire = VsmJson::deserialize(payload).map_err(VsmError::malformed)?;
    from_wire(wire)
}

/// Parse a raw response body. See [`parse_vsm`].
pub fn parse_vsm_str(body: &str) -> Result<Vsm, VsmError> {
    let wire: VsmJson = serde_json::from_str(body).map_err(VsmError::malformed)?;
    from_wire(wire)
}

/// Write a [`Vsm`] back out in wire form.
///
/// Both `current_*` fields are emitted as received, including an empty
/// counterpart; a `null` one comes back absent. Optional node collections
/// are emitted iff they were present on input.
pub fn to_vsm_json(vsm: &Vsm) -> VsmJson {
    VsmJson {
        current_material: vsm.current_material_field().map(str::to_string),
        current_pipeline: vsm.current_pipeline_field().map(str::to_string),
        levels: vsm
            .levels()
            .iter()
            .map(|level| LevelJson {
                nodes: level.nodes().iter().map(node_to_wire).collect(),
            })
            .collect(),
    }
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn from_wire(wire: VsmJson) -> Result<Vsm, VsmError> {
    let current = resolve_current(
        wire.current_pipeline.as_deref(),
        wire.current_material.as_deref(),
    )?;

    let levels = wire
        .levels
        .into_iter()
        .enumerate()
        .map(|(level_idx, level)| {
            let nodes = level
                .nodes
                .into_iter()
                .enumerate()
                .map(|(node_idx, node)| {
                    parse_node(node, &format!("levels[{}].nodes[{}]", level_idx, node_idx))
                })
                .collect::<Result<Vec<_>, VsmError>>()?;
            Ok::<_, VsmError>(Level::new(nodes))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Vsm::new(
        current,
        wire.current_pipeline,
        wire.current_material,
        levels,
    ))
}

/// Pick the current entity from the two top-level fields.
///
/// Absent and empty are the same here. Exactly one of the two must be set.
fn resolve_current(pipeline: Option<&str>, material: Option<&str>) -> Result<Current, VsmError> {
    let pipeline = pipeline.filter(|s| !s.is_empty());
    let material = material.filter(|s| !s.is_empty());

    match (pipeline, material) {
        (Some(p), None) => Ok(Current::new(p.to_string(), true)),
        (None, Some(m)) => Ok(Current::new(m.to_string(), false)),
        (Some(p), Some(m)) => Err(VsmError::AmbiguousCurrent {
            pipeline: p.to_string(),
            material: m.to_string(),
        }),
        (None, None) => Err(VsmError::MissingCurrent),
    }
}

fn parse_node(node: NodeJson, path: &str) -> Result<Node, VsmError> {
    let instances = node
        .instances
        .map(|instances| {
            instances
                .into_iter()
                .enumerate()
                .map(|(idx, instance)| {
                    parse_instance(instance, &format!("{}.instances[{}]", path, idx))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let material_revisions = node.material_revisions.map(|revisions| {
        revisions
            .into_iter()
            .map(|revision| MaterialRevision::new(parse_modifications(revision.modifications)))
            .collect()
    });

    Ok(Node::new(
        node.id,
        node.name,
        node.node_type,
        node.locator,
        node.depth,
        node.parents,
        node.dependents,
        instances,
        material_revisions,
    ))
}

fn parse_instance(instance: InstanceJson, path: &str) -> Result<Instance, VsmError> {
    if instance.counter < 1 {
        return Err(VsmError::InvalidField {
            path: format!("{}.counter", path),
            message: format!("counter must be at least 1, got {}", instance.counter),
        });
    }

    let stages = instance
        .stages
        .into_iter()
        .enumerate()
        .map(|(idx, stage)| parse_stage(stage, &format!("{}.stages[{}]", path, idx)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Instance::new(
        instance.label,
        instance.counter,
        instance.locator,
        stages,
    ))
}

fn parse_stage(stage: StageJson, path: &str) -> Result<Stage, VsmError> {
    if stage.duration.as_f64().is_some_and(|secs| secs < 0.0) {
        return Err(VsmError::InvalidField {
            path: format!("{}.duration", path),
            message: format!("duration must not be negative, got {}", stage.duration),
        });
    }

    Ok(Stage::new(
        stage.name,
        StageStatus::from(stage.status.as_str()),
        stage.duration,
        stage.locator,
    ))
}

fn parse_modifications(modifications: Vec<ModificationJson>) -> Vec<Modification> {
    modifications
        .into_iter()
        .map(|m| Modification::new(m.user, m.revision, m.modified_time, m.comment, m.locator))
        .collect()
}

// ── Serialization helpers ───────────────────────────────────────────

fn node_to_wire(node: &Node) -> NodeJson {
    NodeJson {
        id: node.id().to_string(),
        locator: node.locator().to_string(),
        name: node.name().to_string(),
        depth: node.depth(),
        node_type: node.node_type().to_string(),
        parents: node.parents().to_vec(),
        dependents: node.dependents().to_vec(),
        instances: node
            .instances()
            .map(|instances| instances.iter().map(instance_to_wire).collect()),
        material_revisions: node.material_revisions().map(|revisions| {
            revisions
                .iter()
                .map(|revision| MaterialRevisionJson {
                    modifications: revision
                        .modifications()
                        .iter()
                        .map(modification_to_wire)
                        .collect(),
                })
                .collect()
        }),
    }
}

fn instance_to_wire(instance: &Instance) -> InstanceJson {
    InstanceJson {
        label: instance.label().to_string(),
        locator: instance.locator().to_string(),
        counter: instance.counter(),
        stages: instance
            .stages()
            .iter()
            .map(|stage| StageJson {
                locator: stage.locator().to_string(),
                name: stage.name().to_string(),
                duration: stage.duration().clone(),
                status: stage.status().as_str().to_string(),
            })
            .collect(),
    }
}

fn modification_to_wire(modification: &Modification) -> ModificationJson {
    ModificationJson {
        modified_time: modification.modified_time().to_string(),
        locator: modification.locator().to_string(),
        revision: modification.revision().to_string(),
        comment: modification.comment().to_string(),
        user: modification.user().to_string(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
