//! Fake rule definitions.

use crate::error::SharedError;
use crate::types::request::{Request, RequestPattern};
use crate::types::response::Response;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type ProducerFn = dyn Fn(Request) -> BoxFuture<'static, Result<Response, SharedError>> + Send + Sync;

/// Function producing a response at resolution time.
#[derive(Clone)]
pub struct Producer(Arc<ProducerFn>);

impl Producer {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, SharedError>> + Send + 'static,
    {
        Self(Arc::new(move |request: Request| f(request).boxed()))
    }

    pub fn call(&self, request: Request) -> BoxFuture<'static, Result<Response, SharedError>> {
        (self.0)(request)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

/// What a rule answers with once it matched.
#[derive(Debug, Clone, Default)]
pub enum ResponseSource {
    /// Fixed response, cloned for every call
    Fixed(Response),
    /// Response computed from the request
    Producer(Producer),
    /// Failure delivered to the caller as is
    Failure(SharedError),
    /// Neither response nor error was declared
    #[default]
    Unset,
}

/// One fake: a request matcher, its outcome and an optional delay.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Declared request
    pub request: RequestPattern,
    /// Outcome of the rule
    pub source: ResponseSource,
    /// Delay in milliseconds, overrides the global delay
    pub delay: Option<u64>,
}

impl Rule {
    /// Rule for `request` with no outcome yet.
    pub fn new(request: impl Into<RequestPattern>) -> Self {
        Self {
            request: request.into(),
            source: ResponseSource::Unset,
            delay: None,
        }
    }

    pub fn respond(mut self, response: Response) -> Self {
        self.source = ResponseSource::Fixed(response);
        self
    }

    /// Compute the response from the request when the rule is resolved.
    pub fn respond_with<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, SharedError>> + Send + 'static,
    {
        self.source = ResponseSource::Producer(Producer::new(f));
        self
    }

    pub fn fail<E>(self, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.fail_shared(Arc::new(error))
    }

    /// Fail with an error the caller keeps a handle to.
    pub fn fail_shared(mut self, error: SharedError) -> Self {
        self.source = ResponseSource::Failure(error);
        self
    }

    pub fn delay(mut self, millis: u64) -> Self {
        self.delay = Some(millis);
        self
    }
}
