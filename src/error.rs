use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("FortiGate API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
