//! Request descriptors used both for incoming calls and for rule matchers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the supported methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown HTTP method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Method names are case-insensitive, `"post"` and `"POST"` are the same method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

/// Fixed-shape request descriptor.
///
/// Incoming calls are normalized into this record, and rules that need more
/// than a URL declare their matcher with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Request URL, compared verbatim
    pub url: String,
    /// HTTP method (`None` = not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Request headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(self.with_body(body))
    }

    /// Body as text, empty when the request has none.
    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.text())
    }

    /// Fill every attribute this request lacks from `declared`.
    ///
    /// The URL is never replaced. Headers are merged, own values win.
    pub fn or_declared(mut self, declared: &Request) -> Self {
        if self.method.is_none() {
            self.method = declared.method;
        }
        if self.body.is_none() {
            self.body = declared.body.clone();
        }
        if let Some(declared_headers) = &declared.headers {
            let headers = self.headers.get_or_insert_with(HashMap::new);
            for (name, value) in declared_headers {
                let present = headers.keys().any(|k| k.eq_ignore_ascii_case(name));
                if !present {
                    headers.insert(name.clone(), value.clone());
                }
            }
        }
        self
    }
}

/// Request declared by a rule: either a plain URL or a full descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestPattern {
    Url(String),
    Descriptor(Request),
}

impl RequestPattern {
    /// URL form of the pattern, used in logs and error messages.
    pub fn identity(&self) -> &str {
        match self {
            RequestPattern::Url(url) => url,
            RequestPattern::Descriptor(request) => &request.url,
        }
    }

    pub fn descriptor(&self) -> Option<&Request> {
        match self {
            RequestPattern::Url(_) => None,
            RequestPattern::Descriptor(request) => Some(request),
        }
    }
}

impl From<&str> for RequestPattern {
    fn from(url: &str) -> Self {
        RequestPattern::Url(url.to_owned())
    }
}

impl From<String> for RequestPattern {
    fn from(url: String) -> Self {
        RequestPattern::Url(url)
    }
}

impl From<Request> for RequestPattern {
    fn from(request: Request) -> Self {
        RequestPattern::Descriptor(request)
    }
}
