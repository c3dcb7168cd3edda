/// Errors produced while turning a VSM or page-meta payload into typed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VsmError {
    /// A required field is missing or has the wrong JSON type.
    #[error("malformed payload: {message}")]
    Malformed { message: String },

    /// A field is well-typed but its value is out of range.
    #[error("invalid value at '{path}': {message}")]
    InvalidField { path: String, message: String },

    /// Both `current_pipeline` and `current_material` are non-empty.
    #[error(
        "ambiguous current entity: pipeline '{pipeline}' and material '{material}' are both set"
    )]
    AmbiguousCurrent { pipeline: String, material: String },

    /// Neither `current_pipeline` nor `current_material` is set.
    #[error("no current entity: neither 'current_pipeline' nor 'current_material' is set")]
    MissingCurrent,

    /// The page-meta `type` tag is not `material` or `pipeline`.
    #[error("entity type '{entity_type}' is unknown")]
    UnknownEntityType { entity_type: String },
}

impl VsmError {
    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        VsmError::Malformed {
            message: err.to_string(),
        }
    }
}
