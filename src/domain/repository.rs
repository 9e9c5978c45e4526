use async_trait::async_trait;

use super::category::{Category, CategoryId};
use super::todo::{Todo, TodoId};

/// Persistence for todos. Callers build complete records; the store only keeps them.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    async fn get(&self, id: &TodoId) -> anyhow::Result<Option<Todo>>;
    async fn create(&self, todo: &Todo) -> anyhow::Result<()>;
    /// Overwrites every field except `id` and `created_at`.
    /// Returns the stored record, or `None` when `id` is unknown.
    async fn update(&self, id: &TodoId, todo: &Todo) -> anyhow::Result<Option<Todo>>;
    /// Returns whether a record was removed. Removing an unknown id is not an error.
    async fn delete(&self, id: &TodoId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    async fn list(&self) -> anyhow::Result<Vec<Category>>;
    async fn get(&self, id: &CategoryId) -> anyhow::Result<Option<Category>>;
    async fn create(&self, category: &Category) -> anyhow::Result<()>;
}
