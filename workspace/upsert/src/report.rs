use tracing::info;

use crate::engine::{InsertOutcome, UpdateOutcome};

/// Per-run counters, logged as the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub updated: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub update_errors: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub insert_errors: usize,
    pub skipped: usize,
}

impl SyncReport {
    pub fn record_update(&mut self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated { .. } => self.updated += 1,
            UpdateOutcome::Unchanged => self.unchanged += 1,
            UpdateOutcome::NotFound => self.not_found += 1,
        }
    }

    pub fn record_insert(&mut self, outcome: &InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted { .. } => self.inserted += 1,
            InsertOutcome::Duplicate { .. } => self.duplicates += 1,
            InsertOutcome::Failed { .. } => self.insert_errors += 1,
        }
    }

    /// Adds the counters of another pass. Both passes walk the same records,
    /// so rejected records are counted once.
    pub fn merge(&mut self, other: &SyncReport) {
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.not_found += other.not_found;
        self.update_errors += other.update_errors;
        self.inserted += other.inserted;
        self.duplicates += other.duplicates;
        self.insert_errors += other.insert_errors;
        self.skipped = self.skipped.max(other.skipped);
    }

    /// Number of rows-changing operations that were committed.
    pub fn writes(&self) -> usize {
        self.updated + self.inserted
    }

    pub fn log_summary(&self) {
        info!("Summary:");
        info!("  - Memberships updated: {}", self.updated);
        info!("  - Memberships already up to date: {}", self.unchanged);
        info!("  - Clients not found for update: {}", self.not_found);
        info!("  - Update errors: {}", self.update_errors);
        info!("  - Members inserted: {}", self.inserted);
        info!("  - Members already present: {}", self.duplicates);
        info!("  - Insert errors: {}", self.insert_errors);
        info!("  - Records skipped: {}", self.skipped);
    }
}
