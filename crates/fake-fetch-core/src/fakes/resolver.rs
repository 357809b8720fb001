//! Resolver turning an incoming request into a delayed outcome.
//!
//! This module provides `Resolver` which owns an installed `FakeConfig`, finds
//! the rule answering a request and delivers its outcome once the effective
//! delay has elapsed.

use crate::error::FetchError;
use crate::fakes::clock::{Clock, TokioClock};
use crate::matching::request_matches;
use crate::types::config::FakeConfig;
use crate::types::request::Request;
use crate::types::response::Response;
use crate::types::rule::{ResponseSource, Rule};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Engine resolving requests against an installed fake set.
///
/// `Resolver` provides:
/// - First-match rule lookup via `find_rule()`
/// - Delay precedence via `effective_delay()`
/// - Outcome delivery via `resolve()`
///
/// The installed set is read-only, so one resolver can serve any number of
/// concurrent calls.
#[derive(Clone)]
pub struct Resolver {
    config: FakeConfig,
    clock: Arc<dyn Clock>,
}

impl Resolver {
    /// Create a resolver applying delays on the tokio timer.
    pub fn new(config: impl Into<FakeConfig>) -> Self {
        Self::with_clock(config, Arc::new(TokioClock))
    }

    /// Create a resolver applying delays on `clock`.
    pub fn with_clock(config: impl Into<FakeConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: config.into(),
            clock,
        }
    }

    /// Installed rules and global defaults.
    pub fn config(&self) -> &FakeConfig {
        &self.config
    }

    pub fn rule_count(&self) -> usize {
        self.config.fake_configs.len()
    }

    /// Find the first rule, in registration order, matching `incoming`.
    ///
    /// Returns `None` if no rule matches.
    pub fn find_rule(&self, incoming: &Request) -> Option<&Rule> {
        self.find_rule_indexed(incoming).map(|(_, rule)| rule)
    }

    fn find_rule_indexed(&self, incoming: &Request) -> Option<(usize, &Rule)> {
        self.config
            .fake_configs
            .iter()
            .enumerate()
            .find(|(_, rule)| request_matches(incoming, &rule.request))
    }

    /// Delay applied to a call answered by `rule` (`None` = unmatched).
    pub fn effective_delay(&self, rule: Option<&Rule>) -> Duration {
        self.config
            .global_fake_config
            .effective_delay(rule.and_then(|r| r.delay))
    }

    /// Resolve `incoming` into a response or a failure.
    ///
    /// The outcome is delivered after the effective delay, whether it is a
    /// success or a failure. Response producers run concurrently with the
    /// delay timer, so their own suspension is not added to it.
    pub async fn resolve(&self, incoming: Request) -> Result<Response, FetchError> {
        let Some((index, rule)) = self.find_rule_indexed(&incoming) else {
            let delay = self.effective_delay(None);
            debug!(
                url = %incoming.url,
                method = ?incoming.method,
                delay_ms = delay.as_millis() as u64,
                "No fake matched request"
            );
            self.clock.sleep(delay).await;
            return Ok(self.config.global_fake_config.unmatched_response());
        };

        let delay = self.effective_delay(Some(rule));
        debug!(
            rule = index,
            url = %incoming.url,
            method = ?incoming.method,
            delay_ms = delay.as_millis() as u64,
            "Fake matched request"
        );

        let (outcome, ()) = futures::join!(
            Self::outcome(rule, incoming),
            self.clock.sleep(delay)
        );
        outcome
    }

    async fn outcome(rule: &Rule, incoming: Request) -> Result<Response, FetchError> {
        match &rule.source {
            ResponseSource::Fixed(response) => Ok(response.clone()),
            ResponseSource::Failure(error) => Err(FetchError::Simulated(error.clone())),
            ResponseSource::Producer(producer) => {
                let request = match rule.request.descriptor() {
                    Some(declared) => incoming.or_declared(declared),
                    None => incoming,
                };
                producer.call(request).await.map_err(FetchError::Producer)
            }
            ResponseSource::Unset => {
                let url = rule.request.identity().to_owned();
                warn!(url = %url, "Fake declares neither a response nor an error");
                Err(FetchError::MissingOutcome { url })
            }
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
