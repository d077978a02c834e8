//! Error types for YesDev API operations.

use thiserror::Error;

/// Fallback text used when the remote side reports a failure without a message.
pub const UNKNOWN_ERROR: &str = "未知错误";

/// Errors that can occur during YesDev API operations.
#[derive(Debug, Error)]
pub enum YesDevError {
    /// Configuration is missing or incomplete.
    #[error("YesDev configuration required: {0}")]
    ConfigMissing(String),

    /// A tool argument failed local validation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The envelope reported `ret != 200`.
    #[error("{message}")]
    Remote { code: i64, message: String },

    /// The envelope reported success but carried no `data`.
    #[error("返回数据格式不正确 ({service})")]
    MissingData { service: String },

    /// Non-2xx HTTP response.
    #[error("YesDev API Error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl YesDevError {
    /// Build a [`YesDevError::Remote`] from an envelope's `ret` and `msg`.
    ///
    /// An empty message is replaced with [`UNKNOWN_ERROR`].
    pub fn remote(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };
        Self::Remote { code, message }
    }

    /// Whether this failure came from the remote application rather than the transport.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::MissingData { .. })
    }
}

/// Result type alias for YesDev operations.
pub type Result<T> = core::result::Result<T, YesDevError>;
