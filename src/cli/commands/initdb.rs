use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, error, info, trace};

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing member tables");

    let db = Database::connect(database_url)
        .await
        .context("failed to connect to the database")?;
    debug!("Database connection established");

    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run database migrations: {}", e);
        return Err(e.into());
    }

    info!("Tables user_user, pos_client and user_user_groups are ready");
    Ok(())
}
