//! Shared harness for the integration tests.
//!
//! Each test spawns the real axum application on an ephemeral port over an
//! in-memory `SQLite` pool, then drives it over HTTP - the same pipeline a
//! browser client exercises: mutation → persistence → broadcast.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use secrecy::SecretString;
use sqlx::sqlite::SqlitePoolOptions;

use namo_client::ApiClient;
use namo_core::{Email, UserRole};
use namo_server::config::{ServerConfig, StockPolicy};
use namo_server::db::MIGRATOR;
use namo_server::db::users::{NewUser, UserRepository};
use namo_server::services::auth::hash_password;
use namo_server::state::AppState;

/// Default admin credentials used by [`admin_client`].
pub const ADMIN_EMAIL: &str = "admin@namoincense.in";
pub const ADMIN_PASSWORD: &str = "rT7!uW3@xZ9#aQ5$";

/// A running server instance.
pub struct TestApp {
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    /// Handle onto the server's state, for direct repository access and
    /// event-bus subscriptions.
    pub state: AppState,
}

impl TestApp {
    /// An unauthenticated API client for this instance.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }
}

/// Spawn the app with the default (manual) stock policy.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_policy(StockPolicy::Manual).await
}

/// Spawn the app with the given stock policy.
pub async fn spawn_app_with_policy(stock_policy: StockPolicy) -> TestApp {
    let config = ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        token_secret: SecretString::from("kP8#vN2$wQ5@xR7!yT0%zU3^aV6&bW9*"),
        token_ttl_secs: 3600,
        stock_policy,
        allowed_origin: "http://localhost:3000".to_string(),
        sentry_dsn: None,
    };

    // A single connection keeps the in-memory database alive and shared
    // for the lifetime of the test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("migrations failed");

    let state = AppState::new(config, pool);
    let app = namo_server::app(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    TestApp {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Provision an admin account directly in the store.
pub async fn create_admin(state: &AppState, email: &str, password: &str) {
    let email = Email::parse(email).expect("valid admin email");
    let password_hash = hash_password(password).expect("hashing failed");

    UserRepository::new(state.pool())
        .create(NewUser {
            username: "namo-admin",
            email: &email,
            password_hash: &password_hash,
            role: UserRole::Admin,
        })
        .await
        .expect("failed to create admin");
}

/// Provision an admin, log in through the API, and return a bearer-equipped
/// client.
pub async fn admin_client(app: &TestApp) -> ApiClient {
    create_admin(&app.state, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let client = app.client();
    let login = client
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin login failed");

    client.with_token(login.token)
}
