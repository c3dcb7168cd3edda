//! Endpoint selection and response handling.

use tracing::{debug, info, warn};
use vsm_model::{parse_vsm_str, Entity, PageMeta, Vsm};

use crate::error::FetchError;
use crate::routes;
use crate::transport::VsmTransport;

/// Fetches and parses value stream maps through a [`VsmTransport`].
pub struct VsmService<T: VsmTransport> {
    transport: T,
}

impl<T: VsmTransport> VsmService<T> {
    pub fn new(transport: T) -> Self {
        VsmService { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Map centered on run `counter` of `pipeline_name`.
    pub async fn get_pipeline_vsm(
        &self,
        pipeline_name: &str,
        pipeline_counter: u64,
    ) -> Result<Vsm, FetchError> {
        self.get(&routes::pipeline_vsm_path(pipeline_name, pipeline_counter))
            .await
    }

    /// Map centered on `revision` of the material with `fingerprint`.
    pub async fn get_material_vsm(
        &self,
        fingerprint: &str,
        revision: &str,
    ) -> Result<Vsm, FetchError> {
        self.get(&routes::material_vsm_path(fingerprint, revision))
            .await
    }

    /// Fetch the map a page is about. Performs exactly one request.
    pub async fn fetch(&self, meta: &PageMeta) -> Result<Vsm, FetchError> {
        match meta.entity() {
            Entity::Pipeline(p) => {
                info!(pipeline = p.name(), counter = p.counter(), "fetching pipeline VSM");
                self.get_pipeline_vsm(p.name(), p.counter()).await
            }
            Entity::Material(m) => {
                info!(
                    fingerprint = m.fingerprint(),
                    revision = m.revision(),
                    "fetching material VSM"
                );
                self.get_material_vsm(m.fingerprint(), m.revision()).await
            }
        }
    }

    async fn get(&self, path: &str) -> Result<Vsm, FetchError> {
        debug!(path, transport = self.transport.transport_id(), "GET");
        let response = self.transport.get(path).await?;

        if !response.is_success() {
            warn!(path, status = response.status, "VSM request failed");
            return Err(FetchError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(parse_vsm_str(&response.body)?)
    }
}
