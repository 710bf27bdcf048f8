//! Error type shared by every YouTube Data API operation.

use crate::youtube::models::ApiError;
use reqwest::StatusCode;
use serde_json::{Value, json};

/// Everything that can end a YouTube Data API call.
///
/// Each variant is terminal for the call that produced it, and for the whole
/// chain when it happens mid-pagination.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key was set on the client. Raised before any network I/O.
    #[error(
        "Please set a key using set_key. Get a key at https://console.developers.google.com"
    )]
    MissingKey,

    /// The HTTP layer failed (connection, TLS, body read, client build).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-200 status.
    ///
    /// `error` is a typed view of the remote `error` object; `raw` is that
    /// object exactly as sent, unknown fields included.
    #[error("YouTube API error ({status}): {}", .error.message)]
    Api {
        status: StatusCode,
        error: ApiError,
        raw: Value,
    },

    /// A 200 response whose body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Render the error in the API's own envelope shape: `{"error": {"message": ...}}`.
    ///
    /// API errors keep the remote payload as-is; local errors only carry a message.
    pub fn payload(&self) -> Value {
        match self {
            Error::Api { raw, .. } => json!({ "error": raw }),
            other => json!({ "error": { "message": other.to_string() } }),
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}
