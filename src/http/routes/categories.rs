use axum::{extract::State, routing::get, Router, Json};

use crate::{
    application::category_service::CategoryService,
    domain::category::{Category, CreateCategory},
    http::types::{ApiJson, ApiResult},
};

#[derive(Clone)]
pub struct CategoryState<S: CategoryService> { pub service: S }

pub fn router<S: CategoryService + Clone>(state: CategoryState<S>) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories::<S>).post(create_category::<S>))
        .with_state(state)
}

async fn list_categories<S: CategoryService>(State(state): State<CategoryState<S>>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.service.list().await?))
}

async fn create_category<S: CategoryService>(State(state): State<CategoryState<S>>, ApiJson(payload): ApiJson<CreateCategory>) -> ApiResult<Json<Category>> {
    Ok(Json(state.service.create(payload).await?))
}
