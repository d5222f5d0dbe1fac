//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use users_server::{create_app, AppState, ServerConfig};
use users_storage::{LocalUserStore, SqlitePool};

/// Isolated app instance over its own temp-file database
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let config = ServerConfig::for_testing(db_url);

        let pool = users_storage::create_pool(
            config.active_database_url(),
            config.storage.max_connections,
        )
        .await
        .expect("Failed to create pool");
        users_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let app_state = AppState::new(Arc::new(LocalUserStore::new(pool.clone())));
        let router = create_app(app_state, &config);

        Self {
            router,
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        self.post(uri, "application/json", serde_json::to_string(body).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, content_type: &str, body: String) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Insert a user directly through the storage layer
pub async fn add_user(pool: &SqlitePool, username: &str, email: &str) -> users_core::User {
    users_storage::users::create(pool, users_core::CreateUser::new(username, email))
        .await
        .expect("Failed to create user")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body_bytes.to_vec()).unwrap()
}

/// Known users
pub mod fixtures {
    pub const ABEL_USERNAME: &str = "abel";
    pub const ABEL_EMAIL: &str = "abel.huanca@upeu.edu.pe";
    pub const FREDY_USERNAME: &str = "fredy";
    pub const FREDY_EMAIL: &str = "abelthf@gmail.com";
}
