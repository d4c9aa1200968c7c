use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{pos_client, user_user};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create pos_client table
        manager
            .create_table(
                Table::create()
                    .table(PosClient::table())
                    .if_not_exists()
                    .col(pk_auto(PosClient::column(pos_client::Column::Id)))
                    .col(string(PosClient::column(pos_client::Column::Dni)).unique_key())
                    .col(string(PosClient::column(pos_client::Column::Mobile)))
                    .col(date_null(PosClient::column(pos_client::Column::Birthdate)))
                    .col(string(PosClient::column(pos_client::Column::Address)).default(""))
                    .col(
                        string(PosClient::column(pos_client::Column::IdentificationType))
                            .string_len(2),
                    )
                    .col(
                        boolean(PosClient::column(pos_client::Column::SendEmailInvoice))
                            .default(false),
                    )
                    .col(integer(PosClient::column(pos_client::Column::UserId)).unique_key())
                    .col(date_null(PosClient::column(pos_client::Column::Memstartdate)))
                    .col(date_null(PosClient::column(pos_client::Column::Memenddate)))
                    .col(string_null(PosClient::column(pos_client::Column::Useridacces)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pos_client_user")
                            .from(
                                PosClient::table(),
                                PosClient::column(pos_client::Column::UserId),
                            )
                            .to(UserUser::table(), UserUser::column(user_user::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PosClient::table()).to_owned())
            .await
    }
}
