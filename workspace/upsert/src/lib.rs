pub mod engine;
pub mod error;
pub mod hasher;
pub mod phone;
pub mod report;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use engine::{InsertOutcome, Passes, SyncEngine, SyncSettings, UpdateOutcome};
pub use error::{Result, SyncError};
pub use hasher::{PasswordHasher, Pbkdf2Sha256Hasher, verify_password};
pub use phone::{PhoneSource, RandomPhone};
pub use report::SyncReport;

/// Returns the engine used by the CLI: Django-compatible PBKDF2 hashes and
/// random placeholder phones.
pub fn default_engine(
    db: DatabaseConnection,
    password_iterations: u32,
    settings: SyncSettings,
) -> Result<SyncEngine> {
    let hasher = Pbkdf2Sha256Hasher::new(password_iterations)?;
    Ok(SyncEngine::new(db, Arc::new(hasher), settings))
}
