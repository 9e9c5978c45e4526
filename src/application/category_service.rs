use async_trait::async_trait;

use crate::application::error::ServiceResult;
use crate::domain::category::{default_categories, Category, CategoryId, CreateCategory};
use crate::domain::repository::CategoryRepository;

#[async_trait]
pub trait CategoryService: Send + Sync + 'static {
    async fn list(&self) -> ServiceResult<Vec<Category>>;
    async fn create(&self, input: CreateCategory) -> ServiceResult<Category>;
    /// Inserts whichever default categories are missing. Returns how many were added.
    async fn seed_defaults(&self) -> ServiceResult<usize>;
}

#[derive(Clone)]
pub struct CategoryServiceImpl<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: CategoryRepository> CategoryService for CategoryServiceImpl<R> {
    async fn list(&self) -> ServiceResult<Vec<Category>> { Ok(self.repo.list().await?) }

    async fn create(&self, input: CreateCategory) -> ServiceResult<Category> {
        let category = Category { id: CategoryId::generate(), name: input.name, color: input.color };
        self.repo.create(&category).await?;
        Ok(category)
    }

    async fn seed_defaults(&self) -> ServiceResult<usize> {
        let mut created = 0;
        for category in default_categories() {
            if self.repo.get(&category.id).await?.is_some() {
                continue;
            }
            self.repo.create(&category).await?;
            tracing::info!(id = %category.id, name = %category.name, "seeded category");
            created += 1;
        }
        Ok(created)
    }
}
