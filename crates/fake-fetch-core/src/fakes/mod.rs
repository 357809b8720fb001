//! Fake resolution.
//!
//! - [`Resolver`]: Finds the rule answering a request and delivers its delayed outcome
//! - [`Clock`]: Timer abstraction used to apply delays

pub mod clock;
pub mod resolver;

pub use clock::{Clock, RecordingClock, TokioClock};
pub use resolver::Resolver;
