//! Interceptor answering fetch calls from the installed fakes.

use crate::fetch::{Fetch, Offline, RequestInit, RequestInput};
use async_trait::async_trait;
use fake_fetch_core::{Clock, FakeConfig, FetchError, Resolver, Response};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Fetch replacement holding the installed fakes.
///
/// While fakes are installed every call is resolved against them. Without
/// fakes, calls go to the original fetch the interceptor was created with.
pub struct Interceptor {
    original: Arc<dyn Fetch>,
    installed: RwLock<Option<Arc<Resolver>>>,
}

impl Interceptor {
    /// Create an interceptor with no transport behind it.
    pub fn new() -> Self {
        Self::with_original(Arc::new(Offline))
    }

    /// Create an interceptor restoring `original` when no fakes are installed.
    pub fn with_original(original: Arc<dyn Fetch>) -> Self {
        Self {
            original,
            installed: RwLock::new(None),
        }
    }

    /// Install `config`, replacing every previously installed rule and default.
    ///
    /// Accepts a full `FakeConfig`, a `Vec<Rule>` or a single `Rule`.
    pub fn install(&self, config: impl Into<FakeConfig>) {
        self.install_resolver(Resolver::new(config));
    }

    /// Install `config`, applying delays on `clock`.
    pub fn install_with_clock(&self, config: impl Into<FakeConfig>, clock: Arc<dyn Clock>) {
        self.install_resolver(Resolver::with_clock(config, clock));
    }

    /// Install a prepared `resolver`, replacing the current one.
    pub fn install_resolver(&self, resolver: Resolver) {
        info!(rules = resolver.rule_count(), "Installing fetch fakes");
        *self.installed.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(resolver));
    }

    /// Drop the installed fakes and restore the original fetch.
    pub fn reset(&self) {
        let previous = self
            .installed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("Fetch fakes reset");
        }
    }

    pub fn is_installed(&self) -> bool {
        self.resolver().is_some()
    }

    /// Currently installed resolver.
    pub fn resolver(&self) -> Option<Arc<Resolver>> {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("installed", &self.resolver())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Fetch for Interceptor {
    async fn fetch(
        &self,
        input: RequestInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        // Snapshot the resolver so the lock is never held across the delay
        let Some(resolver) = self.resolver() else {
            debug!("No fetch fakes installed, using original fetch");
            return self.original.fetch(input, init).await;
        };
        resolver.resolve(input.into_request(init)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake_fetch_core::{
        GlobalConfig, HttpMethod, RecordingClock, Request, Rule, SharedError, SimulatedFailure,
    };
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    const DELAY_THRESHOLD: Duration = Duration::from_millis(100);

    fn users_response() -> Response {
        Response::json_body(&json!({"users": ["ameer", "sudhanshu"]})).unwrap()
    }

    fn assert_elapsed_close(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(elapsed + DELAY_THRESHOLD >= expected);
        assert!(elapsed <= expected + DELAY_THRESHOLD);
    }

    /// Original fetch recording the URLs it was called with.
    #[derive(Default)]
    struct RecordingFetch {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Fetch for RecordingFetch {
        async fn fetch(
            &self,
            input: RequestInput,
            init: Option<RequestInit>,
        ) -> Result<Response, FetchError> {
            let request = input.into_request(init);
            self.urls.lock().unwrap().push(request.url);
            Ok(Response::new("real"))
        }
    }

    #[rstest]
    fn test_interceptor_new() {
        let interceptor = Interceptor::new();
        assert!(!interceptor.is_installed());
        assert!(interceptor.resolver().is_none());
        assert!(format!("{:?}", interceptor).starts_with("Interceptor"));
    }

    #[tokio::test]
    async fn test_fakes_simple_get_request() {
        let interceptor = Interceptor::new();
        interceptor.install(FakeConfig::from(
            Rule::new("/api/users").respond(users_response()),
        ));

        let response = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(response, users_response());
    }

    #[tokio::test]
    async fn test_accepts_array_of_rules() {
        let interceptor = Interceptor::new();
        interceptor.install(vec![Rule::new("/api/users").respond(users_response())]);

        let response = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(response, users_response());
    }

    #[tokio::test]
    async fn test_returns_404_response() {
        let interceptor = Interceptor::new();
        interceptor.install(Vec::<Rule>::new());

        let response = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(response, Response::not_found());
        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
    }

    #[tokio::test]
    async fn test_returns_user_defined_404_response() {
        let expected = Response::ok()
            .with_status(404)
            .with_status_text("User defined 404 response");
        let interceptor = Interceptor::new();
        interceptor.install(
            FakeConfig::default()
                .with_global(GlobalConfig::default().with_not_found_response(expected.clone())),
        );

        let response = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(response, expected);
    }

    #[tokio::test]
    async fn test_respects_request_options() {
        let interceptor = Interceptor::new();
        interceptor.install(
            Rule::new(Request::new("/api/users").with_method(HttpMethod::Post))
                .respond(users_response()),
        );

        let response = interceptor
            .fetch(
                "/api/users".into(),
                Some(RequestInit::new().method(HttpMethod::Post)),
            )
            .await
            .unwrap();
        assert_eq!(response, users_response());

        let response = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(response, Response::not_found());
    }

    #[tokio::test]
    async fn test_plain_fetch_matches_get_descriptor() {
        let interceptor = Interceptor::new();
        interceptor.install(
            Rule::new(Request::new("/api/users").with_method(HttpMethod::Get))
                .respond(Response::new("users")),
        );

        let response = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(response.text(), "users");

        let response = interceptor
            .fetch(
                "/api/users".into(),
                Some(RequestInit::new().method(HttpMethod::Post)),
            )
            .await
            .unwrap();
        assert_eq!(response, Response::not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_respects_local_delay() {
        let interceptor = Interceptor::new();
        interceptor.install(
            FakeConfig::from(Rule::new("/api/users").respond(users_response()).delay(2000))
                .with_global(GlobalConfig::default().with_delay(4000)),
        );

        let start = Instant::now();
        interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_elapsed_close(start, Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_respects_global_delay() {
        let interceptor = Interceptor::new();
        interceptor.install(
            FakeConfig::from(Rule::new("/api/users").respond(users_response()))
                .with_global(GlobalConfig::default().with_delay(2000)),
        );

        let start = Instant::now();
        interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_elapsed_close(start, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_install_with_clock() {
        let clock = Arc::new(RecordingClock::new());
        let interceptor = Interceptor::new();
        interceptor.install_with_clock(
            Rule::new("/api/users").respond(users_response()).delay(1500),
            clock.clone(),
        );

        interceptor.fetch("/api/users".into(), None).await.unwrap();
        interceptor.fetch("/api/other".into(), None).await.unwrap();

        assert_eq!(
            clock.recorded(),
            vec![Duration::from_millis(1500), Duration::ZERO]
        );
    }

    #[tokio::test]
    async fn test_throws_provided_error() {
        let error: SharedError = Arc::new(SimulatedFailure::new("ETIMEOUT: the server timedout"));
        let interceptor = Interceptor::new();
        interceptor.install(Rule::new("/api/users").fail_shared(error.clone()));

        let err = interceptor
            .fetch("/api/users".into(), None)
            .await
            .expect_err("Should fail");
        assert!(err.is(&error));
    }

    #[tokio::test]
    async fn test_throws_without_error_or_response() {
        let interceptor = Interceptor::new();
        interceptor.install(Rule::new("/api/users"));

        let err = interceptor
            .fetch("/api/users".into(), None)
            .await
            .expect_err("Should fail");
        assert_eq!(
            err.to_string(),
            "fake for request /api/users must either contain an error or response property"
        );
    }

    #[tokio::test]
    async fn test_executes_producer_for_dynamic_results() {
        let declared = Request::new("/api/add")
            .with_method(HttpMethod::Post)
            .with_json(&json!({"name": "Ameer"}))
            .unwrap();
        let interceptor = Interceptor::new();
        interceptor.install(Rule::new(declared).respond_with(|request: Request| async move {
            let body: Value = match request.json() {
                Ok(body) => body,
                Err(e) => return Err(Arc::new(e) as SharedError),
            };
            let name = body["name"].as_str().unwrap_or_default().to_lowercase();
            Ok(Response::new(name))
        }));

        let response = interceptor
            .fetch(
                "/api/add".into(),
                Some(RequestInit::new().method(HttpMethod::Post)),
            )
            .await
            .unwrap();
        assert_eq!(response, Response::new("ameer"));
    }

    #[tokio::test]
    async fn test_reinstall_discards_previous_fakes() {
        let interceptor = Interceptor::new();
        interceptor.install(
            FakeConfig::from(Rule::new("/api/users").respond(users_response())).with_global(
                GlobalConfig::default().with_not_found_response(Response::ok().with_status(410)),
            ),
        );
        interceptor.install(Rule::new("/api/posts").respond(Response::new("posts")));

        let users = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(users, Response::not_found());

        let posts = interceptor.fetch("/api/posts".into(), None).await.unwrap();
        assert_eq!(posts.text(), "posts");
        assert_eq!(interceptor.resolver().map(|r| r.rule_count()), Some(1));
    }

    #[tokio::test]
    async fn test_reset_restores_original_fetch() {
        let original = Arc::new(RecordingFetch::default());
        let interceptor = Interceptor::with_original(original.clone());
        interceptor.install(Rule::new("/api/users").respond(users_response()));

        let faked = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(faked, users_response());

        interceptor.reset();
        assert!(!interceptor.is_installed());

        let real = interceptor.fetch("/api/users".into(), None).await.unwrap();
        assert_eq!(real.text(), "real");
        assert_eq!(*original.urls.lock().unwrap(), vec!["/api/users".to_string()]);
    }

    #[tokio::test]
    async fn test_not_installed_without_original_fails() {
        let interceptor = Interceptor::new();
        let err = interceptor
            .fetch("/api/users".into(), None)
            .await
            .expect_err("No transport");
        assert!(matches!(err, FetchError::NoTransport { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_in_flight_keep_their_fakes_across_reinstall() {
        let interceptor = Interceptor::new();
        interceptor.install(Rule::new("/api/users").respond(Response::new("old")).delay(1000));

        let pending = interceptor.fetch("/api/users".into(), None);
        let reinstall = async {
            interceptor.install(Rule::new("/api/users").respond(Response::new("new")));
            interceptor.fetch("/api/users".into(), None).await
        };
        let (old, fresh) = futures::join!(pending, reinstall);

        assert_eq!(old.unwrap().text(), "old");
        assert_eq!(fresh.unwrap().text(), "new");
    }
}
