//! Core domain types for requests, responses and fake rules.

pub mod config;
pub mod request;
pub mod response;
pub mod rule;

pub use config::{FakeConfig, GlobalConfig};
pub use request::{HttpMethod, Request, RequestPattern, UnknownMethod};
pub use response::Response;
pub use rule::{Producer, ResponseSource, Rule};
