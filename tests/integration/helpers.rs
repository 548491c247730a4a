//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use campus_api::{AppState, build_router};
use campus_auth::NewAccount;
use campus_core::config::AppConfig;
use campus_database::DatabasePool;
use campus_database::migration::run_migrations;
use campus_database::repositories::{RevokedTokenRepository, UserRepository};
use campus_entity::user::User;

/// Bootstrap admin credentials from the default configuration.
pub const ADMIN_USERNAME: &str = "admin@admin.com";
pub const ADMIN_PASSWORD: &str = "!Ch4ng3Th1sP4ssW0rd!";

/// A password that satisfies the policy.
pub const PASSWORD: &str = "Str0ng!pass";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state, for direct access to the auth components
    pub state: AppState,
    /// Root of the `/data` tree
    pub data_dir: TempDir,
}

impl TestApp {
    /// Create a new test application with a fresh database
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");

        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.auth.secret_key = "integration-test-secret".to_string();
        config.server.data_dir = data_dir.path().to_string_lossy().into_owned();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let users = Arc::new(UserRepository::new(db.pool().clone()));
        let revoked = Arc::new(RevokedTokenRepository::new(db.pool().clone()));
        let state = AppState::new(config, users, revoked).expect("Failed to build state");

        state
            .accounts
            .ensure_bootstrap_admin(&state.config.bootstrap_admin)
            .await
            .expect("Failed to create bootstrap admin");

        let router = build_router(state.clone());

        Self {
            router,
            state,
            data_dir,
        }
    }

    /// Sign up a user and optionally activate them
    pub async fn create_user(&self, username: &str, active: bool) -> User {
        let user = self
            .state
            .accounts
            .signup(NewAccount {
                username: username.to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("Failed to create test user");

        if active {
            self.state
                .accounts
                .set_active_status(user.id, true)
                .await
                .expect("Failed to activate test user")
        } else {
            user
        }
    }

    /// POST the login form
    pub async fn login_response(&self, username: &str, password: &str) -> TestResponse {
        let body = serde_urlencoded::to_string([("username", username), ("password", password)])
            .expect("Failed to encode login form");
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Login and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.login_response(username, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Login as the bootstrap admin
    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a request carrying the given cookie header
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        cookie: &str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::COOKIE, cookie);

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }

    /// Write a file under the `/data` tree
    pub fn write_data_file(&self, relative: &str, contents: &[u8]) {
        let path = self.data_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create data subdir");
        }
        std::fs::write(path, contents).expect("Failed to write data file");
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body bytes
    pub raw: Vec<u8>,
}

impl TestResponse {
    /// The `Set-Cookie` header for cookie `name`, if any
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_string)
    }

    /// `name=value` pair of cookie `name`, ready for a `Cookie` header
    pub fn cookie_pair(&self, name: &str) -> Option<String> {
        self.set_cookie(name)
            .and_then(|c| c.split(';').next().map(str::to_string))
    }

    /// The `message` field of a JSON body
    pub fn message(&self) -> &str {
        self.body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
    }
}
