//! The fetch contract intercepted by fakes.

use async_trait::async_trait;
use fake_fetch_core::{FetchError, HttpMethod, Request, Response};
use std::collections::HashMap;

/// First fetch argument: a URL or a full request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestInput {
    Url(String),
    Request(Request),
}

impl RequestInput {
    /// Build the request seen by fakes, `init` overriding the input's attributes.
    ///
    /// The method defaults to `GET` when neither the input nor `init` sets one.
    pub fn into_request(self, init: Option<RequestInit>) -> Request {
        let request = match self {
            RequestInput::Url(url) => Request::new(url),
            RequestInput::Request(request) => request,
        };
        let mut request = match init {
            Some(init) => init.apply(request),
            None => request,
        };
        request.method.get_or_insert(HttpMethod::Get);
        request
    }
}

impl From<&str> for RequestInput {
    fn from(url: &str) -> Self {
        RequestInput::Url(url.to_owned())
    }
}

impl From<String> for RequestInput {
    fn from(url: String) -> Self {
        RequestInput::Url(url)
    }
}

impl From<Request> for RequestInput {
    fn from(request: Request) -> Self {
        RequestInput::Request(request)
    }
}

/// Per-call options, the second fetch argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInit {
    pub method: Option<HttpMethod>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl RequestInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    fn apply(self, mut request: Request) -> Request {
        if self.method.is_some() {
            request.method = self.method;
        }
        if self.headers.is_some() {
            request.headers = self.headers;
        }
        if self.body.is_some() {
            request.body = self.body;
        }
        request
    }
}

/// Two-argument fetch: request identity or descriptor, plus optional options.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(
        &self,
        input: RequestInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError>;
}

/// Fetch without any transport; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[async_trait]
impl Fetch for Offline {
    async fn fetch(
        &self,
        input: RequestInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        let request = input.into_request(init);
        Err(FetchError::NoTransport { url: request.url })
    }
}
