#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use museum_server::backend::{DatabaseType, Gateway, Row, SqlValue};
use museum_server::config::AppConfig;
use museum_server::models::Role;
use museum_server::schema::definitions::EMPLOYEE;
use museum_server::startup::{build_app, initialize_database};
use museum_server::{AppResult, AppState};

pub const STAFF_EMAIL: &str = "sam.staff@museum.test";
pub const ADMIN_EMAIL: &str = "ada.admin@museum.test";
pub const PASSWORD: &str = "Curator2024!";

/// Wraps a real gateway and counts the statements that reach it
pub struct CountingGateway {
    inner: Arc<dyn Gateway>,
    queries: AtomicUsize,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl CountingGateway {
    pub fn new(inner: Arc<dyn Gateway>) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.queries() + self.inserts() + self.updates()
    }

    pub fn reset(&self) {
        self.queries.store(0, Ordering::SeqCst);
        self.inserts.store(0, Ordering::SeqCst);
        self.updates.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl Gateway for CountingGateway {
    fn database_type(&self) -> DatabaseType {
        self.inner.database_type()
    }

    async fn health_check(&self) -> AppResult<()> {
        self.inner.health_check().await
    }

    async fn init_schema(&self) -> AppResult<()> {
        self.inner.init_schema().await
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> AppResult<Vec<Row>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_all(sql, params).await
    }

    async fn fetch_optional(&self, sql: &str, params: &[SqlValue]) -> AppResult<Option<Row>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_optional(sql, params).await
    }

    async fn insert(&self, sql: &str, params: &[SqlValue], key_column: &str) -> AppResult<i64> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(sql, params, key_column).await
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> AppResult<u64> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(sql, params).await
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub router: Router,
    pub state: AppState,
    pub gateway: Arc<CountingGateway>,
    pub staff_id: i64,
    pub admin_id: i64,
    pub staff_token: String,
    pub admin_token: String,
}

impl TestApp {
    pub fn token_for(&self, staff_id: i64, role: Role) -> String {
        self.state.tokens.issue(staff_id, role).unwrap()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.auth.jwt_secret = "museum-test-secret".to_string();
    config.auth.argon2_memory_kib = 1024;
    config.auth.argon2_iterations = 1;
    config
}

/// In-memory app with one staff and one admin account, counters reset
pub async fn setup_test_app() -> TestApp {
    let config = test_config();
    let real = initialize_database(&config).await.unwrap();
    let gateway = Arc::new(CountingGateway::new(real));
    let state = AppState::new(gateway.clone(), &config).unwrap();

    let staff_id = insert_employee(&state, "Sam Staff", STAFF_EMAIL, Role::Staff).await;
    let admin_id = insert_employee(&state, "Ada Admin", ADMIN_EMAIL, Role::Admin).await;

    let staff_token = state.tokens.issue(staff_id, Role::Staff).unwrap();
    let admin_token = state.tokens.issue(admin_id, Role::Admin).unwrap();

    let router = build_app(state.clone());
    let server = TestServer::new(router.clone()).unwrap();
    gateway.reset();

    TestApp {
        server,
        router,
        state,
        gateway,
        staff_id,
        admin_id,
        staff_token,
        admin_token,
    }
}

pub async fn insert_employee(state: &AppState, name: &str, email: &str, role: Role) -> i64 {
    let hash = state.passwords.hash_password(PASSWORD).unwrap();
    state
        .gateway
        .insert(
            &EMPLOYEE.insert_sql(),
            &[
                SqlValue::from(name),
                SqlValue::from(email),
                SqlValue::from(role.as_str()),
                SqlValue::Text(hash),
            ],
            EMPLOYEE.key_column,
        )
        .await
        .unwrap()
}

pub fn artwork_body(id: i64) -> Value {
    json!({
        "artworkID": id,
        "title": format!("Study No. {}", id),
        "artistName": "Hilma af Klint",
        "yearCreated": 1907,
        "medium": "Tempera on paper",
        "yearAcquired": 2018,
        "provenance": "Gift of the foundation",
        "location": "Gallery 4",
        "artCollectionType": "permanent"
    })
}

pub fn exhibition_body(id: i64) -> Value {
    json!({
        "exhibitionID": id,
        "name": "The Ten Largest",
        "startDate": "2025-03-01",
        "endDate": "2025-06-30",
        "budget": 120000.5,
        "location": "North Hall",
        "numTicketsSold": 1500,
        "themes": "abstraction, spirituality",
        "numArtworks": 10
    })
}

pub fn special_exhibition_body(id: i64) -> Value {
    json!({
        "specialExhibitionID": id,
        "Name": "Paintings for the Future",
        "startDate": "2025-09-01",
        "endDate": "2025-12-31",
        "budget": 45000,
        "location": "Atrium"
    })
}

/// Create an artwork through the API and return its id
pub async fn create_artwork(app: &TestApp, id: i64) -> i64 {
    let response = app
        .server
        .post("/exhibitions/Addartworks")
        .authorization_bearer(&app.staff_token)
        .json(&artwork_body(id))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["insertedId"].as_i64().unwrap()
}

/// Create an exhibition through the API and return its id
pub async fn create_exhibition(app: &TestApp, id: i64) -> i64 {
    let response = app
        .server
        .post("/exhibitions/AddExhibition")
        .authorization_bearer(&app.staff_token)
        .json(&exhibition_body(id))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["insertedId"].as_i64().unwrap()
}
