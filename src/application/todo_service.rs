use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{parse_due_date, CreateTodo, Todo, TodoId, UpdateTodo, DEFAULT_STATUS};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> ServiceResult<Todo>;
    async fn get(&self, id: TodoId) -> ServiceResult<Todo>;
    async fn list(&self) -> ServiceResult<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> ServiceResult<Todo>;
    /// Idempotent: deleting an unknown id succeeds and returns `false`.
    async fn delete(&self, id: TodoId) -> ServiceResult<bool>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

fn not_found(id: &TodoId) -> ServiceError {
    ServiceError::NotFound { entity: "todo", id: id.0.clone() }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> ServiceResult<Todo> {
        let now = Utc::now();
        let due_date = match input.due_date.as_deref() {
            Some(text) => parse_due_date(text)?,
            None => now,
        };
        let todo = Todo {
            id: TodoId::generate(),
            title: input.title,
            category: input.category,
            completed: false,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            due_date,
            description: input.description,
        };
        self.repo.create(&todo).await?;
        tracing::info!(id = %todo.id, title = %todo.title, "todo created");
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> ServiceResult<Todo> {
        self.repo.get(&id).await?.ok_or_else(|| not_found(&id))
    }

    async fn list(&self) -> ServiceResult<Vec<Todo>> { Ok(self.repo.list().await?) }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> ServiceResult<Todo> {
        let due_date = parse_due_date(&input.due_date)?;
        let Some(existing) = self.repo.get(&id).await? else { return Err(not_found(&id)) };
        let merged = Todo {
            id: existing.id,
            created_at: existing.created_at,
            title: input.title,
            category: input.category,
            completed: input.completed,
            status: input.status,
            due_date,
            description: input.description,
        };
        // The row can vanish between the read and the write if a delete races us.
        self.repo.update(&id, &merged).await?.ok_or_else(|| not_found(&id))
    }

    async fn delete(&self, id: TodoId) -> ServiceResult<bool> {
        let removed = self.repo.delete(&id).await?;
        if !removed {
            tracing::debug!(%id, "delete of unknown todo ignored");
        }
        Ok(removed)
    }
}
