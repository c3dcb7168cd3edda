//! HTTP transport for the VSM endpoints.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime. Non-2xx responses are returned as
//! [`RawResponse`]s so the caller sees the server's message unchanged.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs ONE GET against the server.
///
/// Implementations own the base URL, Accept header and credentials;
/// callers pass only the path.
#[async_trait]
pub trait VsmTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<RawResponse, TransportError>;

    /// Returns this transport's identifier (e.g. "http").
    fn transport_id(&self) -> &str;
}

/// Transport that talks to a real server.
pub struct HttpTransport {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        HttpTransport { config, agent }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.server_url, path)
    }
}

#[async_trait]
impl VsmTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        let url = self.url_for(path);
        let agent = self.agent.clone();
        let accept = self.config.accept.clone();
        let auth_token = self.config.auth_token.clone();

        tokio::task::spawn_blocking(move || {
            let mut request = agent.get(&url).header("Accept", &accept);

            if let Some(ref token) = auth_token {
                request = request.header("Authorization", &format!("Bearer {}", token));
            }

            let response = request.call().map_err(|e| TransportError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

            let status = response.status().as_u16();
            let body = response
                .into_body()
                .read_to_string()
                .map_err(|e| TransportError::Request {
                    url,
                    message: format!("failed to read response body: {}", e),
                })?;

            Ok(RawResponse { status, body })
        })
        .await
        .map_err(|e| TransportError::Join {
            message: e.to_string(),
        })?
    }

    fn transport_id(&self) -> &str {
        "http"
    }
}
