//! Per-call query parameters and requested parts.

use std::fmt::Display;

/// Query string and `part` list for a single request.
///
/// Parameters keep insertion order; re-adding a key overwrites its value in
/// place. Parts are appended as given, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
    parts: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a query parameter.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Append a field group to the `part` list.
    pub fn add_part(&mut self, name: impl Into<String>) -> &mut Self {
        self.parts.push(name.into());
        self
    }

    /// The requested parts, comma-joined.
    pub fn parts(&self) -> String {
        self.parts.join(",")
    }

    /// Value of a parameter, if set.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drop every parameter and part.
    pub fn clear(&mut self) {
        self.params.clear();
        self.parts.clear();
    }

    /// Percent-encoded `k=v&k=v` string in insertion order.
    pub fn query_string(&self) -> String {
        self.params()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `base` + `path` + `?` + query string.
    ///
    /// `base` is expected to end with `/`.
    pub fn url(&self, base: &str, path: &str) -> String {
        format!("{}{}?{}", base, path, self.query_string())
    }

    /// Same as [`Query::query_string`] but with the `key` value masked, for logging.
    pub(crate) fn redacted(&self) -> String {
        self.params()
            .map(|(k, v)| {
                if k == "key" {
                    format!("{}=***", k)
                } else {
                    format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
