use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use common::{Validation, read_records, validate_all};
use sea_orm::DatabaseConnection;
use tracing::{debug, error, info, trace};
use upsert::{Passes, SyncReport, default_engine};

use crate::config::AppConfig;

pub async fn sync(
    config_path: &Path,
    database_url: Option<&str>,
    file_path: Option<PathBuf>,
    passes: Passes,
) -> Result<()> {
    trace!("Entering sync function");
    let mut config = AppConfig::load(config_path)?;
    if let Some(file_path) = file_path {
        debug!("Source file overridden: {}", file_path.display());
        config.file_path = file_path;
    }

    let Some(records) = read_source(&config.file_path) else {
        return Ok(());
    };

    let db = config.connect(database_url).await?;
    run_sync(db, &config, passes, &records).await?;

    info!("Sync finished");
    Ok(())
}

/// Reads and validates the export. A missing or unparseable file ends the
/// batch: the error is logged and `None` is returned.
pub fn read_source(path: &Path) -> Option<Vec<Validation>> {
    info!("Reading members from {}", path.display());
    match read_records(path) {
        Ok(records) => {
            info!("Read {} records", records.len());
            Some(validate_all(&records))
        }
        Err(e) => {
            error!("Cannot process the member file {}: {}", path.display(), e);
            None
        }
    }
}

pub async fn run_sync(
    db: DatabaseConnection,
    config: &AppConfig,
    passes: Passes,
    records: &[Validation],
) -> Result<SyncReport> {
    let engine = default_engine(db, config.password_iterations, config.sync_settings())
        .context("invalid sync settings")?;
    debug!("Engine ready: {:?}", engine);

    let report = engine.run(passes, records).await;
    report.log_summary();
    Ok(report)
}
