//! Failures delivered to callers of an intercepted fetch.

use std::sync::Arc;
use thiserror::Error;

/// Error value shared between a rule and every call that delivers it.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync>;

/// Failure of an intercepted fetch call.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// A rule matched but declared neither a response nor an error
    #[error("fake for request {url} must either contain an error or response property")]
    MissingOutcome { url: String },
    /// Error declared on the matched rule
    #[error(transparent)]
    Simulated(SharedError),
    /// Error raised by a response-producing function
    #[error(transparent)]
    Producer(SharedError),
    /// No fakes installed and no transport to fall back to
    #[error("no network transport available for request {url}")]
    NoTransport { url: String },
}

impl FetchError {
    /// Error value carried unchanged from a rule or producer.
    pub fn source_error(&self) -> Option<&SharedError> {
        match self {
            FetchError::Simulated(error) | FetchError::Producer(error) => Some(error),
            FetchError::MissingOutcome { .. } | FetchError::NoTransport { .. } => None,
        }
    }

    /// `true` when `error` is the very value this failure carries.
    pub fn is(&self, error: &SharedError) -> bool {
        self.source_error()
            .is_some_and(|carried| Arc::ptr_eq(carried, error))
    }
}

/// Plain failure message, used for errors declared in fixture files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SimulatedFailure {
    pub message: String,
}

impl SimulatedFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
