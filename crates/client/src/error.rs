use vsm_model::VsmError;

/// The request could not be completed at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS, TLS or body read failure.
    #[error("request to '{url}' failed: {message}")]
    Request { url: String, message: String },

    /// The blocking request task panicked or was cancelled.
    #[error("request task failed: {message}")]
    Join { message: String },
}

/// Everything that can go wrong between choosing an endpoint and holding a parsed map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status; `body` is passed through verbatim.
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse value stream map: {0}")]
    Parse(#[from] VsmError),
}

/// Client configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{path}': {message}")]
    Read { path: String, message: String },

    #[error("could not parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("no server URL configured (use --server, VSM_SERVER_URL, or [server] url in the config file)")]
    MissingServerUrl,
}
