use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Error types for the upsert engine
#[derive(Error, Debug)]
pub enum SyncError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// The username is already taken; found before any write was attempted
    #[error("username {username} already belongs to user {user_id}")]
    AlreadyRegistered { username: String, user_id: i32 },

    /// The blocking password hashing task did not complete
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] tokio::task::JoinError),

    /// Settings the engine cannot work with
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl SyncError {
    /// True when the member already exists: either the username was found up
    /// front or the database refused a row on a unique column.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SyncError::Database(err) => {
                matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            }
            SyncError::AlreadyRegistered { .. } => true,
            SyncError::Hashing(_) | SyncError::InvalidSettings(_) => false,
        }
    }
}

/// Type alias for Result with SyncError
pub type Result<T> = std::result::Result<T, SyncError>;
