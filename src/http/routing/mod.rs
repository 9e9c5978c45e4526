use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::application::{category_service::CategoryService, todo_service::TodoService};
use crate::http::cors::cors;
use crate::http::routes::{categories, todos};

/// Full HTTP surface: API routes, liveness probe, request tracing and CORS.
pub fn app<T, C>(todo_service: T, category_service: C) -> Router
where
    T: TodoService + Clone,
    C: CategoryService + Clone,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(todos::router(todos::TodoState { service: todo_service }))
        .merge(categories::router(categories::CategoryState { service: category_service }))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(cors))
                .layer(TraceLayer::new_for_http()),
        )
}
