//! Insert pass: the account, client and group rows are written together or
//! not at all.

use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use model::entities::prelude::*;
use model::entities::{pos_client, user_user};

use super::helpers::{Result, member, setup_engine, table_counts, ymd};
use crate::engine::InsertOutcome;
use crate::hasher::verify_password;

#[tokio::test]
async fn test_insert_writes_all_three_rows() -> Result<()> {
    let engine = setup_engine().await?;

    let outcome = engine
        .insert_member(&member("4521", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await;
    let InsertOutcome::Inserted { user_id } = outcome else {
        panic!("expected an insert, got {outcome:?}");
    };

    let user = UserUser::find_by_id(user_id).one(engine.db()).await?.unwrap();
    assert_eq!(user.username, "0000004521");
    assert_eq!(user.names, "Member 4521");
    assert_eq!(user.email, "member4521@example.com");
    assert!(user.is_active);
    assert!(!user.is_staff);
    assert!(!user.is_superuser);
    assert!(!user.is_change_password);
    assert_eq!(user.last_login, None);
    assert_eq!(user.email_reset_token, None);
    assert_eq!(user.image, "");
    assert_eq!(user.date_joined, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert!(verify_password("4521", &user.password));
    assert!(!user.password.contains("4521$"));

    let clients = PosClient::find().all(engine.db()).await?;
    assert_eq!(clients.len(), 1);
    let client = &clients[0];
    assert_eq!(client.dni, "0000004521");
    assert_eq!(client.user_id, user_id);
    assert_eq!(client.mobile, "3000000000");
    assert_eq!(client.identification_type, "05");
    assert!(!client.send_email_invoice);
    assert_eq!(client.birthdate, Some(ymd(1990, 5, 4)));
    assert_eq!(client.address, "Calle 10 #20-30");
    assert_eq!(client.memstartdate, Some(ymd(2024, 1, 1)));
    assert_eq!(client.memenddate, Some(ymd(2024, 12, 31)));
    assert_eq!(client.useridacces.as_deref(), Some("4521"));

    let groups = UserUserGroups::find().all(engine.db()).await?;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].user_id, user_id);
    assert_eq!(groups[0].group_id, 2);
    Ok(())
}

#[tokio::test]
async fn test_second_insert_of_same_card_is_duplicate() -> Result<()> {
    let engine = setup_engine().await?;
    let first = member("0012", ymd(2024, 1, 1), ymd(2024, 12, 31));
    // Same username once padded
    let second = member("12", ymd(2024, 2, 1), ymd(2025, 1, 31));

    assert!(matches!(
        engine.insert_member(&first).await,
        InsertOutcome::Inserted { .. }
    ));
    assert!(matches!(
        engine.insert_member(&second).await,
        InsertOutcome::Duplicate { .. }
    ));

    assert_eq!(table_counts(engine.db()).await?, (1, 1, 1));
    Ok(())
}

#[tokio::test]
async fn test_failed_client_insert_rolls_back_account() -> Result<()> {
    let engine = setup_engine().await?;

    // A client already owns dni 0000000055 under a different account
    let other = user_user::ActiveModel {
        password: Set("x".to_string()),
        last_login: Set(None),
        is_superuser: Set(false),
        names: Set("Someone Else".to_string()),
        username: Set("legacy-55".to_string()),
        image: Set(String::new()),
        email: Set(String::new()),
        is_active: Set(true),
        is_staff: Set(false),
        date_joined: Set(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
        is_change_password: Set(false),
        email_reset_token: Set(None),
        ..Default::default()
    }
    .insert(engine.db())
    .await?;
    pos_client::ActiveModel {
        dni: Set("0000000055".to_string()),
        mobile: Set("3999999999".to_string()),
        birthdate: Set(None),
        address: Set(String::new()),
        identification_type: Set("05".to_string()),
        send_email_invoice: Set(false),
        user_id: Set(other.id),
        memstartdate: Set(None),
        memenddate: Set(None),
        useridacces: Set(None),
        ..Default::default()
    }
    .insert(engine.db())
    .await?;

    let outcome = engine
        .insert_member(&member("55", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await;

    // The account insert succeeded inside the transaction, the client did not
    assert!(matches!(outcome, InsertOutcome::Duplicate { .. }));
    let users = UserUser::find().all(engine.db()).await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "legacy-55");
    assert_eq!(table_counts(engine.db()).await?, (1, 1, 0));
    Ok(())
}

#[tokio::test]
async fn test_other_database_errors_are_failures() -> Result<()> {
    let engine = setup_engine().await?;
    engine
        .db()
        .execute_unprepared("DROP TABLE user_user_groups;")
        .await?;

    let outcome = engine
        .insert_member(&member("8", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await;

    assert!(matches!(outcome, InsertOutcome::Failed { .. }));
    assert_eq!(UserUser::find().all(engine.db()).await?.len(), 0);
    assert_eq!(PosClient::find().all(engine.db()).await?.len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_configured_group_and_identification_type() -> Result<()> {
    let db = super::helpers::setup_db().await?;
    let hasher = crate::Pbkdf2Sha256Hasher::new(1).unwrap();
    let engine = crate::SyncEngine::new(
        db,
        std::sync::Arc::new(hasher),
        crate::SyncSettings {
            group_id: 7,
            identification_type: "07".to_string(),
        },
    );

    engine
        .insert_member(&member("1", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await;

    let client = PosClient::find().one(engine.db()).await?.unwrap();
    assert_eq!(client.identification_type, "07");
    assert_eq!(client.mobile.len(), 10);
    let group = UserUserGroups::find().one(engine.db()).await?.unwrap();
    assert_eq!(group.group_id, 7);
    Ok(())
}

/// Counts how often a password was derived.
#[derive(Debug, Default)]
struct CountingHasher {
    calls: std::sync::atomic::AtomicUsize,
}

impl crate::PasswordHasher for CountingHasher {
    fn encode(&self, password: &str) -> String {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("plain${}", password)
    }
}

#[tokio::test]
async fn test_existing_member_is_not_hashed_again() -> Result<()> {
    let db = super::helpers::setup_db().await?;
    let hasher = std::sync::Arc::new(CountingHasher::default());
    let engine = crate::SyncEngine::new(db, hasher.clone(), crate::SyncSettings::default());
    let member = member("640", ymd(2024, 1, 1), ymd(2024, 12, 31));

    assert!(matches!(
        engine.insert_member(&member).await,
        InsertOutcome::Inserted { .. }
    ));
    let outcome = engine.insert_member(&member).await;

    let InsertOutcome::Duplicate { reason } = outcome else {
        panic!("expected a duplicate, got {outcome:?}");
    };
    assert!(reason.contains("0000000640"));
    assert_eq!(hasher.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(table_counts(engine.db()).await?, (1, 1, 1));
    Ok(())
}
