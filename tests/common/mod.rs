#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request};
use axum::Router;
use todo_server::application::{category_service::{CategoryService, CategoryServiceImpl}, todo_service::TodoServiceImpl};
use todo_server::http::routing;
use todo_server::infrastructure::sqlite_repo::SqliteStore;
use tower::ServiceExt;

pub async fn store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    store.init().await.unwrap();
    store
}

/// Router over a fresh in-memory SQLite store with default categories seeded.
pub async fn app() -> (Router, SqliteStore) {
    let store = store().await;
    let categories = CategoryServiceImpl::new(store.clone());
    categories.seed_defaults().await.unwrap();
    (routing::app(TodoServiceImpl::new(store.clone()), categories), store)
}

pub async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<Body> {
    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

pub async fn raw_request(app: &Router, method: &str, path: &str, body: &'static str) -> hyper::Response<Body> {
    let req = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(res: hyper::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}

pub async fn body_bytes(res: hyper::Response<Body>) -> Vec<u8> {
    to_bytes(res.into_body(), 1024 * 1024).await.unwrap().to_vec()
}
