//! Error types for the Zoom client.

use serde_json::{json, Value};

/// Result type for Zoom client operations.
pub type ZoomResult<T> = Result<T, ZoomError>;

/// Error types that can occur when talking to the Zoom API.
#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Zoom returned a non-2xx status.
    #[error("{context}. Status code: {status}")]
    Api {
        context: &'static str,
        status: u16,
        body: String,
    },

    /// Invalid configuration or credential material.
    #[error("{0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ZoomError {
    /// Create an API error carrying the operation context and the raw
    /// response body for diagnosis.
    pub fn api(context: &'static str, status: u16, body: String) -> Self {
        Self::Api {
            context,
            status,
            body,
        }
    }

    /// Render this error as the JSON envelope returned to callers.
    ///
    /// Every path carries `status: "error"`. Non-2xx responses keep
    /// the raw upstream body under `details`; a 401 is called out
    /// explicitly since it usually means an expired access token.
    pub fn into_envelope(self) -> Value {
        match self {
            Self::Api {
                context,
                status,
                body,
            } => {
                let error = if status == 401 {
                    format!(
                        "Unauthorized. Token might be expired. Try refreshing your token. \
                         {context}. Status code: 401"
                    )
                } else {
                    format!("{context}. Status code: {status}")
                };
                json!({
                    "error": error,
                    "details": body,
                    "status": "error",
                })
            }
            other => json!({
                "error": other.to_string(),
                "status": "error",
            }),
        }
    }
}
