use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status label given to every newly created todo.
pub const DEFAULT_STATUS: &str = "in-progress";

/// Layout produced by `<input type="datetime-local">`.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub category: String,
    pub completed: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub description: String,
}

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Raw text, parsed by [`parse_due_date`]. Absent means "due now".
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Body of `PUT /api/todos/{id}`: a full replacement of every mutable field.
///
/// `id` and `created_at` are not part of the schema, so values sent for them are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_status")]
    pub status: String,
    pub due_date: String,
    #[serde(default)]
    pub description: String,
}

fn default_status() -> String { DEFAULT_STATUS.to_string() }

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid due_date {input:?}: expected YYYY-MM-DDTHH:MM or RFC 3339")]
pub struct DueDateError {
    pub input: String,
}

/// Parses a due date in the form layout (read as UTC) or as RFC 3339.
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, DueDateError> {
    let trimmed = input.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, DUE_DATE_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DueDateError { input: input.to_string() })
}
