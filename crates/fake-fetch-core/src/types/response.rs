//! Response values produced by fakes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response delivered to the caller of an intercepted fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code (100-599)
    #[serde(default = "default_status")]
    pub status: u16,
    /// Status line text
    #[serde(default)]
    pub status_text: String,
    /// Response headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

fn default_status() -> u16 {
    200
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: default_status(),
            status_text: String::new(),
            headers: HashMap::new(),
            body: None,
        }
    }
}

impl Response {
    /// `200` response carrying `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// `200` response without a body.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Canonical response for requests no fake matches.
    pub fn not_found() -> Self {
        Self::default()
            .with_status(404)
            .with_status_text("Not Found")
    }

    /// `200` response with `value` serialized as JSON.
    pub fn json_body<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self::new(body).with_header("Content-Type", "application/json"))
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// `true` for 2xx statuses.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.text())
    }
}
