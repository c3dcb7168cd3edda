//! Endpoint dispatch and response handling, against an in-memory transport.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use vsm_client::{FetchError, RawResponse, TransportError, VsmService, VsmTransport};
use vsm_model::{Entity, MaterialMeta, PageMeta, PipelineMeta, VsmError};

struct FakeTransport {
    response: Result<RawResponse, TransportError>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    fn responding(status: u16, body: &str) -> Self {
        FakeTransport {
            response: Ok(RawResponse {
                status,
                body: body.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: TransportError) -> Self {
        FakeTransport {
            response: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VsmTransport for FakeTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(path.to_string());
        self.response.clone()
    }

    fn transport_id(&self) -> &str {
        "fake"
    }
}

fn pipeline_vsm_body() -> String {
    json!({
        "current_pipeline": "up42",
        "levels": [
            {"nodes": [{
                "id": "git-1", "locator": "/m", "name": "https://some.material/org/repo",
                "depth": 1, "node_type": "GIT", "parents": [], "dependents": ["up42"],
                "material_revisions": [{"modifications": [{
                    "modified_time": "about 2 hours ago", "locator": "/m/r1",
                    "revision": "r1", "comment": "fix", "user": "bob"
                }]}]
            }]},
            {"nodes": [{
                "id": "up42", "locator": "/p", "name": "up42", "depth": 2,
                "node_type": "PIPELINE", "parents": ["git-1"], "dependents": [],
                "instances": [{"label": "1", "locator": "/p/1", "counter": 1, "stages": [
                    {"locator": "/s", "name": "build", "duration": 10, "status": "Passed"}
                ]}]
            }]}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn pipeline_meta_fetches_pipeline_route_once() {
    let service = VsmService::new(FakeTransport::responding(200, &pipeline_vsm_body()));
    let meta = PageMeta::new(Entity::Pipeline(PipelineMeta::new("up42", 1)));

    let vsm = service.fetch(&meta).await.unwrap();

    assert_eq!(
        service.transport().calls(),
        vec!["/go/api/internal/pipelines/up42/1/vsm"]
    );
    assert!(vsm.current().is_pipeline());
    assert_eq!(vsm.current().name(), "up42");
    assert_eq!(vsm.levels().len(), 2);
}

#[tokio::test]
async fn material_meta_fetches_material_route_once() {
    let body = json!({"current_material": "https://some.material/org/repo", "levels": [{"nodes": []}]})
        .to_string();
    let service = VsmService::new(FakeTransport::responding(200, &body));
    let meta = PageMeta::new(Entity::Material(MaterialMeta::new("fingerprint", "revision")));

    let vsm = service.fetch(&meta).await.unwrap();

    assert_eq!(
        service.transport().calls(),
        vec!["/go/api/internal/materials/fingerprint/revision/vsm"]
    );
    assert!(!vsm.current().is_pipeline());
    assert_eq!(vsm.levels().len(), 1);
    assert!(vsm.levels()[0].is_empty());
}

#[tokio::test]
async fn direct_getters_use_their_routes() {
    let service = VsmService::new(FakeTransport::responding(200, &pipeline_vsm_body()));
    service.get_pipeline_vsm("up42", 9).await.unwrap();
    service.get_material_vsm("fp", "rev").await.unwrap();

    assert_eq!(
        service.transport().calls(),
        vec![
            "/go/api/internal/pipelines/up42/9/vsm",
            "/go/api/internal/materials/fp/rev/vsm",
        ]
    );
}

#[tokio::test]
async fn non_success_status_surfaces_body_verbatim() {
    let message = r#"{"message": "Pipeline 'up42' with counter '99' not found."}"#;
    let service = VsmService::new(FakeTransport::responding(404, message));

    let err = service.get_pipeline_vsm("up42", 99).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            status: 404,
            body: message.to_string(),
        }
    );
    assert_eq!(service.transport().calls().len(), 1);
}

#[tokio::test]
async fn transport_error_propagates_unchanged() {
    let failure = TransportError::Request {
        url: "http://ci/go".to_string(),
        message: "connection refused".to_string(),
    };
    let service = VsmService::new(FakeTransport::failing(failure.clone()));

    let err = service.get_material_vsm("fp", "rev").await.unwrap_err();
    assert_eq!(err, FetchError::Transport(failure));
    assert_eq!(service.transport().calls().len(), 1);
}

#[tokio::test]
async fn invalid_body_is_parse_error() {
    let service = VsmService::new(FakeTransport::responding(200, "<html>login</html>"));
    let err = service.get_pipeline_vsm("up42", 1).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(VsmError::Malformed { .. })));
}

#[tokio::test]
async fn ambiguous_current_is_parse_error() {
    let body = json!({"current_pipeline": "a", "current_material": "b", "levels": []}).to_string();
    let service = VsmService::new(FakeTransport::responding(200, &body));
    let err = service.get_pipeline_vsm("a", 1).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Parse(VsmError::AmbiguousCurrent { .. })
    ));
}
