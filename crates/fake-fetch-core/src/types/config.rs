//! Installed fake set and its global defaults.

use crate::types::response::Response;
use crate::types::rule::Rule;
use std::time::Duration;

/// Defaults applied when a rule leaves a value out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Response for requests no rule matches
    pub not_found_response: Option<Response>,
    /// Delay in milliseconds for rules without their own
    pub delay: Option<u64>,
}

impl GlobalConfig {
    pub fn with_not_found_response(mut self, response: Response) -> Self {
        self.not_found_response = Some(response);
        self
    }

    pub fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Some(millis);
        self
    }

    /// Response for unmatched requests, falling back to `404 Not Found`.
    pub fn unmatched_response(&self) -> Response {
        self.not_found_response
            .clone()
            .unwrap_or_else(Response::not_found)
    }

    /// Delay for a rule declaring `rule_delay`.
    ///
    /// A rule delay always wins over the global one, the two are never summed.
    pub fn effective_delay(&self, rule_delay: Option<u64>) -> Duration {
        Duration::from_millis(rule_delay.or(self.delay).unwrap_or(0))
    }
}

/// Ordered rules plus global defaults, installed as one unit.
#[derive(Debug, Clone, Default)]
pub struct FakeConfig {
    /// Rules in registration order, the first match wins
    pub fake_configs: Vec<Rule>,
    /// Global defaults
    pub global_fake_config: GlobalConfig,
}

impl FakeConfig {
    pub fn new(fake_configs: Vec<Rule>) -> Self {
        Self {
            fake_configs,
            global_fake_config: GlobalConfig::default(),
        }
    }

    pub fn with_global(mut self, global_fake_config: GlobalConfig) -> Self {
        self.global_fake_config = global_fake_config;
        self
    }

    pub fn push(mut self, rule: Rule) -> Self {
        self.fake_configs.push(rule);
        self
    }
}

impl From<Vec<Rule>> for FakeConfig {
    fn from(fake_configs: Vec<Rule>) -> Self {
        Self::new(fake_configs)
    }
}

impl From<Rule> for FakeConfig {
    fn from(rule: Rule) -> Self {
        Self::new(vec![rule])
    }
}
