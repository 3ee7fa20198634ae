use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The device rejected the sentence (a `!trap` reply); carries the device's message.
    #[error("Device error: {0}")]
    Remote(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed filter expression: {0}")]
    MalformedExpression(String),

    #[error("Stream closed")]
    StreamClosed,
}

pub type Result<T> = std::result::Result<T, QueryError>;
