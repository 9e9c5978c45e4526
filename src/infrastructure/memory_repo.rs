use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    category::{Category, CategoryId},
    repository::{CategoryRepository, TodoRepository},
    todo::{Todo, TodoId},
};

/// Process-local store. Each entity kind lives in one lock-guarded vector kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    todos: Arc<RwLock<Vec<Todo>>>,
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Todo>> { Ok(self.todos.read().await.clone()) }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        Ok(self.todos.read().await.iter().find(|t| &t.id == id).cloned())
    }

    async fn create(&self, todo: &Todo) -> Result<()> {
        let mut todos = self.todos.write().await;
        if todos.iter().any(|t| t.id == todo.id) {
            anyhow::bail!("duplicate todo id {}", todo.id);
        }
        todos.push(todo.clone());
        Ok(())
    }

    async fn update(&self, id: &TodoId, todo: &Todo) -> Result<Option<Todo>> {
        let mut todos = self.todos.write().await;
        let Some(slot) = todos.iter_mut().find(|t| &t.id == id) else { return Ok(None) };
        *slot = Todo { id: slot.id.clone(), created_at: slot.created_at, ..todo.clone() };
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &TodoId) -> Result<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| &t.id != id);
        Ok(todos.len() != before)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>> { Ok(self.categories.read().await.clone()) }

    async fn get(&self, id: &CategoryId) -> Result<Option<Category>> {
        Ok(self.categories.read().await.iter().find(|c| &c.id == id).cloned())
    }

    async fn create(&self, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.id == category.id) {
            anyhow::bail!("duplicate category id {}", category.id);
        }
        categories.push(category.clone());
        Ok(())
    }
}
