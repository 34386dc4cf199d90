//! Repositories - one per resource

pub mod tasks;

pub use tasks::TaskRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i64 },
}
