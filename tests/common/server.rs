//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port with its own
//! temporary SQLite user database and a heuristic-only generation
//! service (no LLM endpoint is configured in tests).

use super::constants::*;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use titleforge_server::generation::GenerationService;
use titleforge_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use titleforge_server::user::{JwtKeys, PasswordCredentials, SqliteUserStore, UserStore};
use tokio::net::TcpListener;

/// Test server instance with an isolated database.
///
/// Temp resources live as long as the struct; the serve task is
/// detached and dies with the test runtime.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// User store for direct database access in tests
    pub user_store: Arc<dyn UserStore>,

    _temp_db_dir: TempDir,
}

impl TestServer {
    /// Spawns a test server with generation throttling disabled, which
    /// suits most tests.
    pub async fn spawn() -> Self {
        Self::spawn_with_min_interval(Duration::ZERO).await
    }

    /// Spawns a test server with the given generation min-interval.
    pub async fn spawn_with_min_interval(min_interval: Duration) -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_db_dir.path().join("users.db");

        let user_store: Arc<dyn UserStore> =
            Arc::new(SqliteUserStore::new(&db_path).expect("Failed to open user store"));

        // Seed one known user for login tests
        let credentials =
            PasswordCredentials::from_password(TEST_PASS).expect("Failed to hash test password");
        user_store
            .create_user(TEST_EMAIL, credentials)
            .expect("Failed to seed test user");

        let jwt_keys = Arc::new(JwtKeys::new(TEST_JWT_SECRET));
        let generation = Arc::new(GenerationService::heuristic_only());

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: 0,
            frontend_dir_path: None,
            disable_registration: false,
            generation_min_interval: min_interval,
        };

        let app = make_app(config, user_store.clone(), jwt_keys, generation)
            .expect("Failed to build app");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to read local addr")
            .port();

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server crashed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            user_store,
            _temp_db_dir: temp_db_dir,
        }
    }
}
