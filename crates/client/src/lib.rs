//! vsm-client: fetches value stream maps from the server.
//!
//! Two levels of abstraction:
//! - [`VsmTransport`]: performs ONE GET and hands back status + body
//! - [`VsmService`]: picks the pipeline- or material-scoped endpoint,
//!   performs exactly one request through its transport, and parses the
//!   body into a [`vsm_model::Vsm`]
//!
//! There are no retries, no polling and no timeout at this layer. A failed
//! fetch is returned to the caller unchanged.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ConfigError, FetchError, TransportError};
pub use service::VsmService;
pub use transport::{HttpTransport, RawResponse, VsmTransport};
