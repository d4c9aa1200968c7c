use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::user_user::Column;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user_user table
        manager
            .create_table(
                Table::create()
                    .table(UserUser::table())
                    .if_not_exists()
                    .col(pk_auto(UserUser::column(Column::Id)))
                    .col(string(UserUser::column(Column::Password)))
                    .col(timestamp_with_time_zone_null(UserUser::column(Column::LastLogin)))
                    .col(boolean(UserUser::column(Column::IsSuperuser)).default(false))
                    .col(string(UserUser::column(Column::Names)))
                    .col(string(UserUser::column(Column::Username)).unique_key())
                    .col(string(UserUser::column(Column::Image)).default(""))
                    .col(string(UserUser::column(Column::Email)))
                    .col(boolean(UserUser::column(Column::IsActive)).default(true))
                    .col(boolean(UserUser::column(Column::IsStaff)).default(false))
                    .col(timestamp_with_time_zone(UserUser::column(Column::DateJoined)))
                    .col(boolean(UserUser::column(Column::IsChangePassword)).default(false))
                    .col(string_null(UserUser::column(Column::EmailResetToken)))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserUser::table()).to_owned())
            .await
    }
}
