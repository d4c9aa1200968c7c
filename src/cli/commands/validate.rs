use std::path::{Path, PathBuf};

use anyhow::Result;
use common::Validation;
use tracing::{info, trace, warn};

use super::sync::read_source;
use crate::config::AppConfig;

/// Counts of a dry run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub valid: usize,
    pub rejected: usize,
}

pub fn validate(config_path: &Path, file_path: Option<PathBuf>) -> Result<()> {
    trace!("Entering validate function");
    let config = AppConfig::load(config_path)?;
    let file_path = file_path.unwrap_or(config.file_path);

    let Some(records) = read_source(&file_path) else {
        return Ok(());
    };

    let summary = summarize(&records);
    info!(
        "{} records would be synchronized, {} would be skipped",
        summary.valid, summary.rejected
    );
    Ok(())
}

pub fn summarize(records: &[Validation]) -> ValidationSummary {
    let mut summary = ValidationSummary::default();
    for validation in records {
        match validation {
            Validation::Valid(_) => summary.valid += 1,
            Validation::Rejected(rejection) => {
                warn!("{}", rejection);
                summary.rejected += 1;
            }
        }
    }
    summary
}
