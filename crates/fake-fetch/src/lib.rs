//! Fetch interceptor backed by fake-fetch rules.
//!
//! Code under test calls [`fetch`] (or any [`Fetch`] implementation it was
//! handed). Tests [`install`] a set of fakes, and every call is answered by
//! the first matching rule after its configured delay. [`reset`] restores the
//! original fetch.
//!
//! The process-wide interceptor behind the free functions is available via
//! [`global`]. Callers that prefer explicit state can create their own
//! [`Interceptor`] and pass it around as an `Arc<dyn Fetch>`.
//!
//! # Example
//!
//! ```ignore
//! fake_fetch::install(vec![
//!     Rule::new("/api/users").respond(Response::new("[]")),
//!     Rule::new(Request::new("/api/users").with_method(HttpMethod::Post))
//!         .fail(SimulatedFailure::new("ETIMEOUT: the server timedout"))
//!         .delay(2000),
//! ]);
//!
//! let users = fake_fetch::fetch("/api/users", None).await?;
//! ```

mod fetch;
mod interceptor;

pub use fake_fetch_core::{
    Clock, FakeConfig, FetchError, GlobalConfig, HttpMethod, RecordingClock, Request,
    RequestPattern, Response, Rule, SharedError, SimulatedFailure, TokioClock,
};
pub use fetch::{Fetch, Offline, RequestInit, RequestInput};
pub use interceptor::Interceptor;

use std::sync::OnceLock;

static GLOBAL: OnceLock<Interceptor> = OnceLock::new();

/// Process-wide interceptor used by [`install`], [`reset`] and [`fetch`].
pub fn global() -> &'static Interceptor {
    GLOBAL.get_or_init(Interceptor::new)
}

/// Install fakes on the process-wide interceptor, replacing any previous set.
pub fn install(config: impl Into<FakeConfig>) {
    global().install(config);
}

/// Remove the process-wide fakes.
pub fn reset() {
    global().reset();
}

/// Fetch through the process-wide interceptor.
pub async fn fetch(
    input: impl Into<RequestInput>,
    init: Option<RequestInit>,
) -> Result<Response, FetchError> {
    global().fetch(input.into(), init).await
}
