//! Error types for Postboard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostboardError>;

#[derive(Error, Debug)]
pub enum PostboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl PostboardError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PostboardError::Config(_) => 2,
            PostboardError::Gateway(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Failure of a remote call.
///
/// Callers treat every variant the same way; the variants only exist so the
/// cause shows up in logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {path}")]
    Status { status: u16, path: String },

    #[error("Failed to decode response from {path}: {detail}")]
    Decode { path: String, detail: String },
}
