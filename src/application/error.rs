use crate::domain::todo::DueDateError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl From<DueDateError> for ServiceError {
    fn from(err: DueDateError) -> Self { Self::Validation(err.to_string()) }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
