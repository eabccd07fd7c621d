//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use userhub_api::{AppState, build_app};
use userhub_auth::SignedTokenCodec;
use userhub_broker::MemoryEventPublisher;
use userhub_cache::memory::MemoryCacheProvider;
use userhub_cache::{CacheManager, ResetTokenStore};
use userhub_core::config::{AppConfig, AuthConfig, DatabaseConfig};
use userhub_core::events::topics;
use userhub_database::MemoryUserDirectory;
use userhub_service::{LifecycleService, LifecycleSettings, UserAdminService};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User records, for direct inspection
    pub directory: Arc<MemoryUserDirectory>,
    /// Every event the app published
    pub publisher: Arc<MemoryEventPublisher>,
    /// Pending reset tokens
    pub reset_tokens: ResetTokenStore,
    /// Codec sharing the app's secret
    pub codec: SignedTokenCodec,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = test_config();

        let directory = Arc::new(MemoryUserDirectory::new());
        let publisher = Arc::new(MemoryEventPublisher::new());
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::default()));
        let reset_tokens = ResetTokenStore::new(cache.clone());
        let codec = SignedTokenCodec::from_config(&config.auth).expect("Failed to build codec");

        let lifecycle = LifecycleService::new(
            directory.clone(),
            reset_tokens.clone(),
            publisher.clone(),
            codec.clone(),
            LifecycleSettings::from_config(&config),
        );
        let admin = UserAdminService::new(directory.clone(), config.timeouts);

        let router = build_app(AppState {
            config: Arc::new(config),
            lifecycle,
            admin,
            directory: directory.clone(),
            cache,
        });

        Self {
            router,
            directory,
            publisher,
            reset_tokens,
            codec,
        }
    }

    /// Register the Ada fixture user and return the new id.
    pub async fn register_ada(&self) -> String {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "full_name": "Ada L",
                    "email": "ada@example.com",
                    "password": "Abcdef1!",
                    "password2": "Abcdef1!",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["_embedded"]["user_id"]
            .as_str()
            .expect("user_id missing")
            .to_string()
    }

    /// Token carried by the most recent `user.reset_requested` event.
    pub async fn last_reset_token(&self) -> String {
        let events = self.publisher.events_on(topics::RESET_REQUESTED).await;
        let payload = events.last().expect("no reset event").json().expect("bad payload");
        payload["token"].as_str().expect("token missing").to_string()
    }

    /// Make a request to the test server
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            name: "userhub_test".to_string(),
            ..DatabaseConfig::default()
        },
        cache: Default::default(),
        broker: Default::default(),
        auth: AuthConfig {
            secret: "integration-secret".to_string(),
            ..AuthConfig::default()
        },
        timeouts: Default::default(),
        logging: Default::default(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
