//! Timers used to apply fake delays.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Source of delays for resolved fakes.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Complete after `duration` has elapsed on this clock.
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer.
///
/// Under `#[tokio::test(start_paused = true)]` the timer runs on tokio's
/// virtual time, so delays complete instantly while still being observable
/// through `tokio::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }
}

/// Clock that never waits and records every requested delay.
#[derive(Debug, Default)]
pub struct RecordingClock {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in call order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
