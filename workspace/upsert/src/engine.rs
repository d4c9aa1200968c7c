//! Update and insert of validated members.
//!
//! A run is two passes over the same records. The update pass moves the
//! membership range of clients that already exist. The insert pass then tries
//! to create every member; for members that already exist this fails on the
//! unique username and is reported as a duplicate.

use std::sync::Arc;

use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{debug, error, info, trace, warn};

use common::{ValidatedMember, Validation};
use model::entities::prelude::{PosClient, UserUser};
use model::entities::{pos_client, user_user, user_user_groups};

use crate::error::{Result, SyncError};
use crate::hasher::PasswordHasher;
use crate::phone::{PhoneSource, RandomPhone};
use crate::report::SyncReport;

/// Group every imported member joins ("member").
pub const DEFAULT_GROUP_ID: i32 = 2;
/// Identification type code of the national id card.
pub const DEFAULT_IDENTIFICATION_TYPE: &str = "05";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub group_id: i32,
    pub identification_type: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            group_id: DEFAULT_GROUP_ID,
            identification_type: DEFAULT_IDENTIFICATION_TYPE.to_string(),
        }
    }
}

/// Which passes a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Passes {
    UpdateOnly,
    InsertOnly,
    #[default]
    Both,
}

impl Passes {
    pub fn runs_update(self) -> bool {
        matches!(self, Passes::UpdateOnly | Passes::Both)
    }

    pub fn runs_insert(self) -> bool {
        matches!(self, Passes::InsertOnly | Passes::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { start_changed: bool, end_changed: bool },
    Unchanged,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { user_id: i32 },
    /// A unique column already holds this member.
    Duplicate { reason: String },
    Failed { reason: String },
}

pub struct SyncEngine {
    db: DatabaseConnection,
    hasher: Arc<dyn PasswordHasher>,
    phones: Arc<dyn PhoneSource>,
    settings: SyncSettings,
}

impl SyncEngine {
    pub fn new(
        db: DatabaseConnection,
        hasher: Arc<dyn PasswordHasher>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            db,
            hasher,
            phones: Arc::new(RandomPhone),
            settings,
        }
    }

    pub fn with_phone_source(mut self, phones: Arc<dyn PhoneSource>) -> Self {
        self.phones = phones;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Moves the membership range of an existing client to the dates of the
    /// record. Only the columns that differ are written.
    pub async fn update_member(&self, member: &ValidatedMember) -> Result<UpdateOutcome> {
        trace!("Looking up client {}", member.username);

        let client = PosClient::find()
            .filter(pos_client::Column::Dni.eq(member.username.as_str()))
            .one(&self.db)
            .await?;

        let Some(client) = client else {
            info!(
                "Client {} ({}) not found, nothing to update",
                member.full_name, member.username
            );
            return Ok(UpdateOutcome::NotFound);
        };

        let start_changed = client.memstartdate != Some(member.membership_start);
        let end_changed = client.memenddate != Some(member.membership_end);

        if !start_changed && !end_changed {
            info!(
                "Membership of {} ({}) is already up to date",
                member.full_name, member.username
            );
            return Ok(UpdateOutcome::Unchanged);
        }

        debug!(
            "Client {}: start {:?} -> {}, end {:?} -> {}",
            client.id,
            client.memstartdate,
            member.membership_start,
            client.memenddate,
            member.membership_end
        );

        let mut active: pos_client::ActiveModel = client.into();
        if start_changed {
            active.memstartdate = Set(Some(member.membership_start));
        }
        if end_changed {
            active.memenddate = Set(Some(member.membership_end));
        }
        active.update(&self.db).await?;

        info!(
            "Membership of {} ({}) updated to {} - {}",
            member.full_name, member.username, member.membership_start, member.membership_end
        );
        Ok(UpdateOutcome::Updated {
            start_changed,
            end_changed,
        })
    }

    /// Creates the account, client profile and group membership of a member in
    /// one transaction. Failures are classified and logged, never returned.
    pub async fn insert_member(&self, member: &ValidatedMember) -> InsertOutcome {
        match self.try_insert_member(member).await {
            Ok(user_id) => {
                info!(
                    "User {} saved successfully with ID: {}",
                    member.full_name, user_id
                );
                InsertOutcome::Inserted { user_id }
            }
            Err(err) if err.is_unique_violation() => {
                warn!(
                    "User {} ({}) already exists: {}",
                    member.full_name, member.username, err
                );
                InsertOutcome::Duplicate {
                    reason: err.to_string(),
                }
            }
            Err(err) => {
                error!(
                    "Error saving user {} ({}): {}",
                    member.full_name, member.username, err
                );
                InsertOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn try_insert_member(&self, member: &ValidatedMember) -> Result<i32> {
        // Known members are reported without deriving a password
        if let Some(existing) = UserUser::find()
            .filter(user_user::Column::Username.eq(member.username.as_str()))
            .one(&self.db)
            .await?
        {
            return Err(SyncError::AlreadyRegistered {
                username: existing.username,
                user_id: existing.id,
            });
        }

        let hasher = Arc::clone(&self.hasher);
        let card_no = member.card_no.clone();
        let password = tokio::task::spawn_blocking(move || hasher.encode(&card_no)).await?;
        let mobile = self.phones.placeholder_phone();
        let date_joined = member.membership_start.and_time(NaiveTime::MIN).and_utc();

        // Dropping the transaction without commit rolls it back.
        let txn = self.db.begin().await?;

        let user = user_user::ActiveModel {
            password: Set(password),
            last_login: Set(None),
            is_superuser: Set(false),
            names: Set(member.full_name.clone()),
            username: Set(member.username.to_string()),
            image: Set(String::new()),
            email: Set(member.email.clone()),
            is_active: Set(true),
            is_staff: Set(false),
            date_joined: Set(date_joined),
            is_change_password: Set(false),
            email_reset_token: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        debug!("Inserted user_user {} for {}", user.id, member.username);

        let client = pos_client::ActiveModel {
            dni: Set(member.username.to_string()),
            mobile: Set(mobile),
            birthdate: Set(member.birthdate),
            address: Set(member.address.clone()),
            identification_type: Set(self.settings.identification_type.clone()),
            send_email_invoice: Set(false),
            user_id: Set(user.id),
            memstartdate: Set(Some(member.membership_start)),
            memenddate: Set(Some(member.membership_end)),
            useridacces: Set(member.external_user_id.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        debug!("Inserted pos_client {} for user {}", client.id, user.id);

        user_user_groups::ActiveModel {
            user_id: Set(user.id),
            group_id: Set(self.settings.group_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(user.id)
    }

    pub async fn run_update_pass(&self, records: &[Validation]) -> SyncReport {
        info!("Starting update pass over {} records", records.len());
        let mut report = SyncReport::default();

        for validation in records {
            let member = match validation {
                Validation::Valid(member) => member,
                Validation::Rejected(rejection) => {
                    warn!("{}", rejection);
                    report.skipped += 1;
                    continue;
                }
            };

            match self.update_member(member).await {
                Ok(outcome) => report.record_update(&outcome),
                Err(err) => {
                    error!(
                        "Error updating the membership of {} ({}): {}",
                        member.full_name, member.username, err
                    );
                    report.update_errors += 1;
                }
            }
        }

        info!("Update pass finished: {} updated", report.updated);
        report
    }

    pub async fn run_insert_pass(&self, records: &[Validation]) -> SyncReport {
        info!("Starting insert pass over {} records", records.len());
        let mut report = SyncReport::default();

        for validation in records {
            match validation {
                Validation::Valid(member) => {
                    let outcome = self.insert_member(member).await;
                    report.record_insert(&outcome);
                }
                Validation::Rejected(rejection) => {
                    warn!("{}", rejection);
                    report.skipped += 1;
                }
            }
        }

        info!("Insert pass finished: {} inserted", report.inserted);
        report
    }

    /// Runs the selected passes, update first.
    pub async fn run(&self, passes: Passes, records: &[Validation]) -> SyncReport {
        let mut report = SyncReport::default();

        if passes.runs_update() {
            report.merge(&self.run_update_pass(records).await);
        }
        if passes.runs_insert() {
            report.merge(&self.run_insert_pass(records).await);
        }

        report
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
