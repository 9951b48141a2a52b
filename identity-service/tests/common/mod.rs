#![allow(dead_code)]

use std::sync::Arc;

use auth::JwtHandler;
use auth::PasswordHasher;
use auth::TokenService;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::notifications::LogResetLinkNotifier;
use identity_service::outbound::repositories::SqliteUserRepository;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenService>,
}

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Argon2id with minimal cost so tests stay fast.
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(64, 1, 1).expect("Failed to build password hasher")
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let pool = test_pool().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let tokens = Arc::new(TokenService::new(JwtHandler::new(TEST_JWT_SECRET)));
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let notifier = Arc::new(LogResetLinkNotifier::new(
            "http://localhost:5173/reset-password",
        ));

        let auth_service = Arc::new(
            AuthService::new(
                Arc::clone(&user_repository),
                notifier,
                Arc::clone(&tokens),
            )
            .with_password_hasher(fast_hasher()),
        );
        let user_service = Arc::new(UserService::new(user_repository, Arc::clone(&tokens)));

        let router = create_router(
            auth_service,
            user_service,
            &["http://localhost:5173".to_string()],
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            pool,
            api_client: reqwest::Client::new(),
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register through the API and return the response body.
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the API.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Open a guest session and return its access token.
    pub async fn guest_token(&self) -> String {
        let body: serde_json::Value = self
            .post("/auth/guest")
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"].as_str().unwrap().to_string()
    }
}
