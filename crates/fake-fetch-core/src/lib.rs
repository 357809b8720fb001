//! Core library for fake-fetch.
//!
//! Matches intercepted requests against an ordered table of fake rules and
//! resolves them into delayed responses or failures.
//!
//! - [`types`]: Requests, responses, rules and the installed [`FakeConfig`]
//! - [`matching`]: Pure request matching
//! - [`fakes`]: [`Resolver`] and the [`Clock`] used to apply delays
//!
//! # Example
//!
//! ```ignore
//! let resolver = Resolver::new(vec![
//!     Rule::new("/api/users").respond(Response::new("[]")).delay(200),
//!     Rule::new("/api/down").fail(SimulatedFailure::new("ETIMEOUT")),
//! ]);
//! let response = resolver.resolve(Request::new("/api/users")).await?;
//! ```

pub mod error;
pub mod fakes;
pub mod matching;
pub mod types;

pub use error::{FetchError, SharedError, SimulatedFailure};
pub use fakes::{Clock, RecordingClock, Resolver, TokioClock};
pub use types::{
    FakeConfig, GlobalConfig, HttpMethod, Producer, Request, RequestPattern, Response,
    ResponseSource, Rule,
};
