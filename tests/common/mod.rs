#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use crud_backend::sql::Statement;
use crud_backend::{
    app_router, ensure_schema, AppState, BackendDescriptor, ConnectionManager, ServiceRegistry,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Fresh in-memory SQLite database with the entity tables created.
pub async fn memory_pool() -> Arc<ConnectionManager> {
    let pool = ConnectionManager::connect(&BackendDescriptor::sqlite_memory()).unwrap();
    ensure_schema(&pool).await.unwrap();
    Arc::new(pool)
}

pub fn build_test_app(pool: Arc<ConnectionManager>) -> Router {
    let services = ServiceRegistry::with_default_services(pool.clone()).unwrap();
    build_app_with(pool, services)
}

pub fn build_app_with(pool: Arc<ConnectionManager>, services: ServiceRegistry) -> Router {
    app_router(AppState::new(pool, services), 64 * 1024)
}

/// Run raw SQL against the pool, e.g. to simulate a storage fault.
pub async fn exec(pool: &ConnectionManager, sql: &'static str) {
    let mut conn = pool.get_connection().await.unwrap();
    conn.execute(&Statement::new(sql, pool.backend())).await.unwrap();
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}
