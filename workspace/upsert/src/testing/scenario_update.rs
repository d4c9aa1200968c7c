//! Update pass behavior against a seeded client.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use model::entities::pos_client;
use model::entities::prelude::PosClient;

use super::helpers::{Result, member, setup_engine, table_counts, ymd};
use crate::engine::{InsertOutcome, UpdateOutcome};

async fn stored_client(
    engine: &crate::SyncEngine,
    dni: &str,
) -> Result<pos_client::Model> {
    Ok(PosClient::find()
        .filter(pos_client::Column::Dni.eq(dni))
        .one(engine.db())
        .await?
        .expect("client should exist"))
}

#[tokio::test]
async fn test_missing_client_is_not_found() -> Result<()> {
    let engine = setup_engine().await?;

    let outcome = engine
        .update_member(&member("4521", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await
        .expect("lookup should succeed");

    assert_eq!(outcome, UpdateOutcome::NotFound);
    assert_eq!(table_counts(engine.db()).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn test_only_end_date_is_moved() -> Result<()> {
    let engine = setup_engine().await?;
    let seeded = engine
        .insert_member(&member("4521", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await;
    assert!(matches!(seeded, InsertOutcome::Inserted { .. }));

    let renewed = member("4521", ymd(2024, 1, 1), ymd(2025, 1, 31));
    let outcome = engine.update_member(&renewed).await.unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Updated {
            start_changed: false,
            end_changed: true,
        }
    );

    let client = stored_client(&engine, "0000004521").await?;
    assert_eq!(client.memstartdate, Some(ymd(2024, 1, 1)));
    assert_eq!(client.memenddate, Some(ymd(2025, 1, 31)));
    Ok(())
}

#[tokio::test]
async fn test_update_is_idempotent() -> Result<()> {
    let engine = setup_engine().await?;
    engine
        .insert_member(&member("77", ymd(2024, 1, 1), ymd(2024, 6, 30)))
        .await;

    let renewed = member("77", ymd(2024, 7, 1), ymd(2024, 12, 31));

    let first = engine.update_member(&renewed).await.unwrap();
    let after_first = stored_client(&engine, "0000000077").await?;

    let second = engine.update_member(&renewed).await.unwrap();
    let after_second = stored_client(&engine, "0000000077").await?;

    assert_eq!(
        first,
        UpdateOutcome::Updated {
            start_changed: true,
            end_changed: true,
        }
    );
    assert_eq!(second, UpdateOutcome::Unchanged);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second.memstartdate, Some(ymd(2024, 7, 1)));
    Ok(())
}

#[tokio::test]
async fn test_update_leaves_other_columns_alone() -> Result<()> {
    let engine = setup_engine().await?;
    engine
        .insert_member(&member("9", ymd(2024, 1, 1), ymd(2024, 1, 31)))
        .await;
    let before = stored_client(&engine, "0000000009").await?;

    let mut renewed = member("9", ymd(2024, 1, 1), ymd(2024, 2, 29));
    renewed.address = "Somewhere else".to_string();
    renewed.email = "changed@example.com".to_string();
    engine.update_member(&renewed).await.unwrap();

    let after = stored_client(&engine, "0000000009").await?;
    assert_eq!(after.address, before.address);
    assert_eq!(after.mobile, before.mobile);
    assert_eq!(after.user_id, before.user_id);
    assert_eq!(after.memenddate, Some(ymd(2024, 2, 29)));
    Ok(())
}

#[tokio::test]
async fn test_null_stored_dates_are_filled() -> Result<()> {
    let engine = setup_engine().await?;
    engine
        .insert_member(&member("31", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await;

    let mut cleared: pos_client::ActiveModel = stored_client(&engine, "0000000031").await?.into();
    cleared.memstartdate = Set(None);
    cleared.memenddate = Set(None);
    cleared.update(engine.db()).await?;

    let outcome = engine
        .update_member(&member("31", ymd(2024, 1, 1), ymd(2024, 12, 31)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Updated {
            start_changed: true,
            end_changed: true,
        }
    );
    let client = stored_client(&engine, "0000000031").await?;
    assert_eq!(client.memstartdate, Some(ymd(2024, 1, 1)));
    assert_eq!(client.memenddate, Some(ymd(2024, 12, 31)));
    Ok(())
}
