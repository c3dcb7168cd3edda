//! Server paths for the VSM API and the console VSM pages.
//!
//! Every dynamic segment is percent-encoded; material fingerprints and
//! pipeline names may contain characters that are not path-safe.

use urlencoding::encode;
use vsm_model::{Entity, PageMeta};

/// API path of a pipeline-centered map.
pub fn pipeline_vsm_path(pipeline_name: &str, pipeline_counter: u64) -> String {
    format!(
        "/go/api/internal/pipelines/{}/{}/vsm",
        encode(pipeline_name),
        pipeline_counter
    )
}

/// API path of a material-centered map.
pub fn material_vsm_path(fingerprint: &str, revision: &str) -> String {
    format!(
        "/go/api/internal/materials/{}/{}/vsm",
        encode(fingerprint),
        encode(revision)
    )
}

/// Console page showing the map for a page's entity.
pub fn vsm_page_path(meta: &PageMeta) -> String {
    match meta.entity() {
        Entity::Pipeline(p) => format!(
            "/go/pipelines/value_stream_map/{}/{}",
            encode(p.name()),
            p.counter()
        ),
        Entity::Material(m) => format!(
            "/go/materials/value_stream_map/{}/{}",
            encode(m.fingerprint()),
            encode(m.revision())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsm_model::{MaterialMeta, PipelineMeta};

    #[test]
    fn pipeline_path() {
        assert_eq!(
            pipeline_vsm_path("up42", 1),
            "/go/api/internal/pipelines/up42/1/vsm"
        );
    }

    #[test]
    fn material_path() {
        assert_eq!(
            material_vsm_path("fingerprint", "revision"),
            "/go/api/internal/materials/fingerprint/revision/vsm"
        );
    }

    #[test]
    fn segments_are_encoded() {
        assert_eq!(
            pipeline_vsm_path("my pipeline", 2),
            "/go/api/internal/pipelines/my%20pipeline/2/vsm"
        );
        assert_eq!(
            material_vsm_path("a/b", "r#1"),
            "/go/api/internal/materials/a%2Fb/r%231/vsm"
        );
    }

    #[test]
    fn page_paths() {
        let pipeline = PageMeta::new(Entity::Pipeline(PipelineMeta::new("up42", 7)));
        assert_eq!(
            vsm_page_path(&pipeline),
            "/go/pipelines/value_stream_map/up42/7"
        );

        let material = PageMeta::new(Entity::Material(MaterialMeta::new("4f2c", "a1b2")));
        assert_eq!(
            vsm_page_path(&material),
            "/go/materials/value_stream_map/4f2c/a1b2"
        );
    }
}
