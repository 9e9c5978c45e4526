use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Opaque UI color code, stored as given.
    pub color: String,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Categories every store starts with. Ids are fixed so reseeding is idempotent.
pub fn default_categories() -> Vec<Category> {
    [("1", "Work", "#FF4444"), ("2", "Personal", "#44FF44"), ("3", "Shopping", "#4444FF")]
        .into_iter()
        .map(|(id, name, color)| Category {
            id: CategoryId(id.to_string()),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}
