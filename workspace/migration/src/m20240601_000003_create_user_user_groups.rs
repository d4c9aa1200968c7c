use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{user_user, user_user_groups};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user_user_groups table
        manager
            .create_table(
                Table::create()
                    .table(UserUserGroups::table())
                    .if_not_exists()
                    .col(pk_auto(UserUserGroups::column(user_user_groups::Column::Id)))
                    .col(integer(UserUserGroups::column(user_user_groups::Column::UserId)))
                    .col(integer(UserUserGroups::column(user_user_groups::Column::GroupId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_user_groups_user")
                            .from(
                                UserUserGroups::table(),
                                UserUserGroups::column(user_user_groups::Column::UserId),
                            )
                            .to(UserUser::table(), UserUser::column(user_user::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // An account is in a group at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_user_user_groups_user_group")
                    .table(UserUserGroups::table())
                    .col(UserUserGroups::column(user_user_groups::Column::UserId))
                    .col(UserUserGroups::column(user_user_groups::Column::GroupId))
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserUserGroups::table()).to_owned())
            .await
    }
}
