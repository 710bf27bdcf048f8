//! YouTube Data API v3 response envelopes.
//!
//! Result items stay opaque JSON; only the list envelope (`items`,
//! `nextPageToken`) and the error envelope are typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a list response.
///
/// `items` are passed through verbatim. `raw` keeps the full body so callers
/// that want `pageInfo` or other envelope fields still have them.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Result items on this page
    pub items: Vec<Value>,
    /// Continuation token; `None` when this is the last page
    pub next_page_token: Option<String>,
    /// The complete response body
    pub raw: Value,
}

impl Page {
    /// Split a list response body into items and continuation token.
    ///
    /// An empty `nextPageToken` is treated the same as a missing one.
    pub fn from_body(raw: Value) -> serde_json::Result<Self> {
        let envelope = ListEnvelope::deserialize(&raw)?;
        Ok(Self {
            items: envelope.items,
            next_page_token: envelope.next_page_token.filter(|t| !t.is_empty()),
            raw,
        })
    }
}

/// YouTube API list response wrapper.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    /// Response items
    #[serde(default)]
    items: Vec<Value>,
    /// Next page token for pagination
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

/// The `error` object of a failed API response.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code echoed by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Canonical status name (e.g. `PERMISSION_DENIED`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Individual error reasons
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// One entry of `error.errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}
