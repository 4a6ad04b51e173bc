use sol_core::SolError;
use thiserror::Error;

/// Errors from the client layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Sol(#[from] SolError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
