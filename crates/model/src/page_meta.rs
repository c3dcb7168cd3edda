//! Page-level address of the entity a value stream map is drawn for.
//!
//! The console page embeds `{"type": "pipeline" | "material", "entity": {...}}`.
//! [`PageMeta::from_json`] turns that into a tagged [`Entity`], which
//! decides whether the pipeline- or the material-scoped map is fetched.

use serde::Deserialize;

use crate::error::VsmError;

/// A pipeline run: `(name, counter)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineMeta {
    name: String,
    counter: u64,
}

impl PipelineMeta {
    pub fn new(name: impl Into<String>, counter: u64) -> Self {
        PipelineMeta {
            name: name.into(),
            counter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }
}

/// A material revision: `(fingerprint, revision)`, plus the display name
/// when the page knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialMeta {
    fingerprint: String,
    revision: String,
    name: Option<String>,
}

impl MaterialMeta {
    pub fn new(fingerprint: impl Into<String>, revision: impl Into<String>) -> Self {
        MaterialMeta {
            fingerprint: fingerprint.into(),
            revision: revision.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// The entity a page is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Material(MaterialMeta),
    Pipeline(PipelineMeta),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    entity: Entity,
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PageMetaJson {
    #[serde(rename = "type")]
    entity_type: String,
    #[serde(default)]
    entity: serde_json::Value,
}

#[derive(Deserialize)]
struct PipelineMetaJson {
    name: String,
    counter: CounterJson,
}

/// The server-rendered page sends the counter as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum CounterJson {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct MaterialMetaJson {
    fingerprint: String,
    revision: String,
    #[serde(default)]
    name: Option<String>,
}

impl PageMeta {
    pub fn new(entity: Entity) -> Self {
        PageMeta { entity }
    }

    /// Parse a page-meta payload.
    ///
    /// Any `type` other than `"material"` or `"pipeline"` is rejected with
    /// [`VsmError::UnknownEntityType`]; there is no default.
    pub fn from_json(payload: &serde_json::Value) -> Result<PageMeta, VsmError> {
        let meta = PageMetaJson::deserialize(payload).map_err(VsmError::malformed)?;

        let entity = match meta.entity_type.as_str() {
            "material" => {
                let m = MaterialMetaJson::deserialize(&meta.entity).map_err(VsmError::malformed)?;
                Entity::Material(MaterialMeta {
                    fingerprint: m.fingerprint,
                    revision: m.revision,
                    name: m.name.filter(|n| !n.is_empty()),
                })
            }
            "pipeline" => {
                let p = PipelineMetaJson::deserialize(&meta.entity).map_err(VsmError::malformed)?;
                Entity::Pipeline(PipelineMeta {
                    name: p.name,
                    counter: parse_counter(p.counter)?,
                })
            }
            other => {
                return Err(VsmError::UnknownEntityType {
                    entity_type: other.to_string(),
                })
            }
        };

        Ok(PageMeta { entity })
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Label/value pairs for the page header, in display order.
    pub fn key_values(&self) -> Vec<(&'static str, String)> {
        match &self.entity {
            Entity::Pipeline(p) => vec![
                ("Pipeline", p.name.clone()),
                ("Instance", p.counter.to_string()),
            ],
            Entity::Material(m) => {
                let mut pairs = Vec::with_capacity(3);
                if let Some(name) = &m.name {
                    pairs.push(("Material", name.clone()));
                }
                pairs.push(("Fingerprint", m.fingerprint.clone()));
                pairs.push(("Revision", m.revision.clone()));
                pairs
            }
        }
    }
}

fn parse_counter(counter: CounterJson) -> Result<u64, VsmError> {
    let value = match counter {
        CounterJson::Number(n) => n,
        CounterJson::Text(text) => text.trim().parse::<u64>().map_err(|e| VsmError::InvalidField {
            path: "entity.counter".to_string(),
            message: format!("'{}' is not a pipeline counter: {}", text, e),
        })?,
    };

    if value < 1 {
        return Err(VsmError::InvalidField {
            path: "entity.counter".to_string(),
            message: format!("counter must be at least 1, got {}", value),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pipeline_meta() {
        let meta = PageMeta::from_json(&json!({
            "type": "pipeline",
            "entity": {"name": "up42", "counter": 3}
        }))
        .unwrap();

        assert_eq!(meta.entity(), &Entity::Pipeline(PipelineMeta::new("up42", 3)));
        assert_eq!(
            meta.key_values(),
            vec![("Pipeline", "up42".to_string()), ("Instance", "3".to_string())]
        );
    }

    #[test]
    fn test_pipeline_counter_as_string() {
        let meta = PageMeta::from_json(&json!({
            "type": "pipeline",
            "entity": {"name": "up42", "counter": "12"}
        }))
        .unwrap();
        match meta.entity() {
            Entity::Pipeline(p) => assert_eq!(p.counter(), 12),
            other => panic!("expected Pipeline, got {:?}", other),
        }
    }

    #[test]
    fn test_pipeline_counter_rejected() {
        for counter in [json!("latest"), json!(0), json!("0")] {
            let err = PageMeta::from_json(&json!({
                "type": "pipeline",
                "entity": {"name": "up42", "counter": counter}
            }))
            .unwrap_err();
            assert!(
                matches!(err, VsmError::InvalidField { ref path, .. } if path == "entity.counter"),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_material_meta() {
        let meta = PageMeta::from_json(&json!({
            "type": "material",
            "entity": {"name": "gocd", "fingerprint": "4f2c9e", "revision": "a1b2c3"}
        }))
        .unwrap();

        match meta.entity() {
            Entity::Material(m) => {
                assert_eq!(m.fingerprint(), "4f2c9e");
                assert_eq!(m.revision(), "a1b2c3");
                assert_eq!(m.name(), Some("gocd"));
            }
            other => panic!("expected Material, got {:?}", other),
        }
        assert_eq!(
            meta,
            PageMeta::new(Entity::Material(
                MaterialMeta::new("4f2c9e", "a1b2c3").with_name("gocd")
            ))
        );
        assert_eq!(
            meta.key_values(),
            vec![
                ("Material", "gocd".to_string()),
                ("Fingerprint", "4f2c9e".to_string()),
                ("Revision", "a1b2c3".to_string()),
            ]
        );
    }

    #[test]
    fn test_material_meta_without_name() {
        let meta = PageMeta::from_json(&json!({
            "type": "material",
            "entity": {"fingerprint": "4f2c9e", "revision": "a1b2c3"}
        }))
        .unwrap();
        assert_eq!(
            meta.entity(),
            &Entity::Material(MaterialMeta::new("4f2c9e", "a1b2c3"))
        );
        assert_eq!(
            meta.key_values(),
            vec![
                ("Fingerprint", "4f2c9e".to_string()),
                ("Revision", "a1b2c3".to_string())
            ]
        );
    }

    #[test]
    fn test_unknown_entity_type() {
        let err = PageMeta::from_json(&json!({"type": "widget", "entity": {}})).unwrap_err();
        assert_eq!(
            err,
            VsmError::UnknownEntityType {
                entity_type: "widget".to_string()
            }
        );
        assert_eq!(err.to_string(), "entity type 'widget' is unknown");
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let err = PageMeta::from_json(&json!({"entity": {"name": "x", "counter": 1}})).unwrap_err();
        assert!(matches!(err, VsmError::Malformed { .. }));
    }

    #[test]
    fn test_entity_body_mismatch_is_malformed() {
        let err = PageMeta::from_json(&json!({
            "type": "material",
            "entity": {"name": "up42", "counter": 1}
        }))
        .unwrap_err();
        assert!(matches!(err, VsmError::Malformed { .. }));
    }
}
