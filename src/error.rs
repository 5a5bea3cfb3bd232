use thiserror::Error;

/// Errors surfaced at the library boundary.
///
/// Classification itself never fails; these only cover inputs that cannot be
/// handed to the parser at all, or output that cannot be rendered.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No input buffer, or a buffer that is not valid UTF-8.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised while loading a [`Conf`](crate::models::Conf).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ParseResult<T> = Result<T, ParseError>;
