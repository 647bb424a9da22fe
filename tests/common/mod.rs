// tests/common/mod.rs
#![allow(dead_code)] // not every test file uses every helper

use musicworld_backend::config::Config;
use musicworld_backend::database::{DbPool, create_pool, run_migrations};
use musicworld_backend::models::{
    Identity, ItemRequest, ItemResponse, LoginRequest, RegisterRequest, UserResponse,
};
use musicworld_backend::services::PageService;
use musicworld_backend::AppState;

pub const CUSTOMER_EMAIL: &str = "alice@example.com";
pub const CUSTOMER_PASSWORD: &str = "correct horse";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub pool: DbPool,
    pub state: AppState,
}

/// Fresh in-memory store. One connection, so every query sees the same
/// database.
pub fn test_config() -> Config {
    Config::parse(
        r#"
        [server]
        host = "127.0.0.1"
        port = 0

        [database]
        url = "sqlite::memory:"
        max_connections = 1

        [session]
        secret = "integration-test-secret-integration-test-secret-integration-test-secret"
        expires_in = 3600

        [auth]
        bcrypt_cost = 4

        [exchange_rates]
        enabled = false
        url = "http://127.0.0.1:9/rates"
        timeout_secs = 1
        currencies = ["USD", "EUR"]
        "#,
    )
    .expect("test config parses")
}

pub async fn setup_with_pages(page_service: PageService) -> TestApp {
    let config = test_config();
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool).await.expect("Failed to run migrations");

    let state =
        AppState::new(pool.clone(), &config, page_service).expect("Failed to build app state");
    TestApp { pool, state }
}

pub async fn setup() -> TestApp {
    setup_with_pages(PageService::without_rates()).await
}

impl TestApp {
    pub async fn create_item(&self, name: &str, price: f64) -> ItemResponse {
        self.state
            .catalog_service
            .create_item(ItemRequest {
                name: name.to_string(),
                description: format!("{name} description"),
                price,
            })
            .await
            .expect("Failed to create item")
    }

    pub async fn register_customer(&self) -> Identity {
        let user = self
            .state
            .auth_service
            .register(RegisterRequest {
                email: CUSTOMER_EMAIL.to_string(),
                password: CUSTOMER_PASSWORD.to_string(),
                confirm: CUSTOMER_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to register customer");
        Identity {
            user_id: user.id,
            email: user.email,
            role: user.role,
        }
    }

    pub async fn create_admin(&self) {
        self.state
            .auth_service
            .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("Failed to create admin");
    }

    pub async fn login(&self, email: &str, password: &str) -> UserResponse {
        self.state
            .auth_service
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("Login failed")
    }
}
