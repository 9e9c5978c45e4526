use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    category::{Category, CategoryId},
    repository::{CategoryRepository, TodoRepository},
    todo::{Todo, TodoId},
};

/// Both entity tables behind one SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteStore {
    /// Opens `database_url`, creating the database file and its parent directories when missing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let in_memory = database_url.contains(":memory:");
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {database_url}"))?
            .create_if_missing(true);
        if !in_memory {
            if let Some(path) = database_path(database_url) {
                create_parent_dir(path)?;
            }
        }
        let pool = pool_options(in_memory)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Creates both tables if they are missing.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                due_date TEXT NOT NULL,
                description TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                color TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query(
            "SELECT id, title, category, completed, status, created_at, due_date, description FROM todos ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(&*self.pool)
        .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(
            "SELECT id, title, category, completed, status, created_at, due_date, description FROM todos WHERE id = ?1",
        )
        .bind(&id.0)
        .fetch_optional(&*self.pool)
        .await?;
        row.map(row_to_todo).transpose()
    }

    async fn create(&self, todo: &Todo) -> Result<()> {
        sqlx::query(
            "INSERT INTO todos (id, title, category, completed, status, created_at, due_date, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&todo.id.0)
        .bind(&todo.title)
        .bind(&todo.category)
        .bind(todo.completed)
        .bind(&todo.status)
        .bind(todo.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .bind(todo.due_date.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .bind(&todo.description)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, id: &TodoId, todo: &Todo) -> Result<Option<Todo>> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?2, category = ?3, completed = ?4, status = ?5, due_date = ?6, description = ?7
             WHERE id = ?1",
        )
        .bind(&id.0)
        .bind(&todo.title)
        .bind(&todo.category)
        .bind(todo.completed)
        .bind(&todo.status)
        .bind(todo.due_date.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .bind(&todo.description)
        .execute(&*self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        TodoRepository::get(self, id).await
    }

    async fn delete(&self, id: &TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(&id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CategoryRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, color FROM categories ORDER BY rowid ASC")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_category).collect()
    }

    async fn get(&self, id: &CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, color FROM categories WHERE id = ?1")
            .bind(&id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_category).transpose()
    }

    async fn create(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT INTO categories (id, name, color) VALUES (?1, ?2, ?3)")
            .bind(&category.id.0)
            .bind(&category.name)
            .bind(&category.color)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    if in_memory {
        // An in-memory database lives exactly as long as its single connection.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

/// File path part of a `sqlite:` url, without query parameters.
fn database_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    (!path.is_empty()).then(|| Path::new(path))
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let created_at: String = row.try_get("created_at")?;
    let due_date: String = row.try_get("due_date")?;
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        title: row.try_get("title")?,
        category: row.try_get("category")?,
        completed: row.try_get("completed")?,
        status: row.try_get("status")?,
        created_at: parse_timestamp(&created_at)?,
        due_date: parse_timestamp(&due_date)?,
        description: row.try_get("description")?,
    })
}

fn row_to_category(row: SqliteRow) -> Result<Category> {
    Ok(Category {
        id: CategoryId(row.try_get("id")?),
        name: row.try_get("name")?,
        color: row.try_get("color")?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).with_context(|| format!("corrupt timestamp {raw:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn store() -> SqliteStore {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        store.init().await.unwrap();
        store
    }

    fn sample(id: &str, minute: u32) -> Todo {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap();
        Todo {
            id: TodoId(id.into()),
            title: format!("todo {id}"),
            category: "Work".into(),
            completed: false,
            status: "in-progress".into(),
            created_at: at,
            due_date: at,
            description: String::new(),
        }
    }

    #[test]
    fn memory_pool_never_reaps_its_connection() {
        let options = pool_options(true);
        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);
        assert_eq!(pool_options(false).get_max_connections(), 5);
    }

    #[test]
    fn extracts_file_path_from_url() {
        assert_eq!(database_path("sqlite://todos.db"), Some(Path::new("todos.db")));
        assert_eq!(database_path("sqlite:///var/lib/app/todos.db?mode=rwc"), Some(Path::new("/var/lib/app/todos.db")));
        assert_eq!(database_path("sqlite:data/todos.db"), Some(Path::new("data/todos.db")));
        assert_eq!(database_path("postgres://x"), None);
    }

    #[tokio::test]
    async fn connect_creates_missing_directories() {
        let root = std::env::temp_dir().join(format!("todo-server-{}", uuid::Uuid::new_v4()));
        let db = root.join("nested").join("todos.db");
        let store = SqliteStore::connect(&format!("sqlite://{}", db.display())).await.unwrap();
        store.init().await.unwrap();
        assert!(db.exists());
        drop(store);
        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn init_is_repeatable() {
        let store = store().await;
        store.init().await.unwrap();
        assert!(TodoRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_oldest_first() {
        let store = store().await;
        TodoRepository::create(&store, &sample("b", 5)).await.unwrap();
        TodoRepository::create(&store, &sample("a", 1)).await.unwrap();
        let ids: Vec<_> = TodoRepository::list(&store).await.unwrap().into_iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let store = store().await;
        let original = sample("x", 0);
        TodoRepository::create(&store, &original).await.unwrap();
        let mut replacement = sample("ignored", 30);
        replacement.title = "changed".into();
        replacement.completed = true;
        let stored = TodoRepository::update(&store, &original.id, &replacement).await.unwrap().unwrap();
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.title, "changed");
        assert!(stored.completed);
        assert_eq!(stored.due_date, replacement.due_date);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id() {
        let store = store().await;
        let missing = TodoId("missing".into());
        assert!(TodoRepository::update(&store, &missing, &sample("y", 0)).await.unwrap().is_none());
        assert!(!TodoRepository::delete(&store, &missing).await.unwrap());
        assert!(TodoRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn categories_round_trip() {
        let store = store().await;
        let category = Category { id: CategoryId("c1".into()), name: "Errands".into(), color: "#123456".into() };
        CategoryRepository::create(&store, &category).await.unwrap();
        let found = CategoryRepository::get(&store, &category.id).await.unwrap();
        assert_eq!(found, Some(category));
    }
}
