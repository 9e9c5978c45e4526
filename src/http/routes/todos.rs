use axum::{extract::{Path, State}, routing::{get, put}, Router, Json};

use crate::{
    application::todo_service::TodoService,
    domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo},
    http::types::{ApiJson, ApiMessage, ApiResult},
};

#[derive(Clone)]
pub struct TodoState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: TodoState<S>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/api/todos/:id", put(update_todo::<S>).get(get_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<TodoState<S>>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.service.list().await?))
}

async fn create_todo<S: TodoService>(State(state): State<TodoState<S>>, ApiJson(payload): ApiJson<CreateTodo>) -> ApiResult<Json<Todo>> {
    Ok(Json(state.service.create(payload).await?))
}

async fn get_todo<S: TodoService>(State(state): State<TodoState<S>>, Path(id): Path<String>) -> ApiResult<Json<Todo>> {
    Ok(Json(state.service.get(TodoId(id)).await?))
}

async fn update_todo<S: TodoService>(State(state): State<TodoState<S>>, Path(id): Path<String>, ApiJson(payload): ApiJson<UpdateTodo>) -> ApiResult<Json<Todo>> {
    Ok(Json(state.service.update(TodoId(id), payload).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<TodoState<S>>, Path(id): Path<String>) -> ApiResult<Json<ApiMessage>> {
    state.service.delete(TodoId(id)).await?;
    Ok(Json(ApiMessage::new("Todo deleted")))
}
