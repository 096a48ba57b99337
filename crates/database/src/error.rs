use models::validation::ValidationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

pub type Result<T, E = ModelError> = std::result::Result<T, E>;

/// Errors surfaced by the entity services
#[derive(Debug, Error)]
pub enum ModelError {
    /// A unique column already holds the value, e.g. a duplicate project slug
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("image storage failed: {0}")]
    Storage(#[from] std::io::Error),
    #[error(transparent)]
    Db(DbErr),
}

impl ModelError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::UniqueViolation(message),
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Self::ForeignKeyViolation(message)
            }
            _ => Self::Db(err),
        }
    }
}
