use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use super::user_user;

/// Point-of-sale client profile of a member.
///
/// `dni` holds the same zero-padded card number as `user_user.username` and
/// is what the synchronization looks members up by.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pos_client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub dni: String,
    pub mobile: String,
    pub birthdate: Option<NaiveDate>,
    pub address: String,
    /// Identification document code, "05" is the national id card.
    pub identification_type: String,
    pub send_email_invoice: bool,
    pub user_id: i32,
    /// Membership start. Only the membership range changes after creation.
    pub memstartdate: Option<NaiveDate>,
    pub memenddate: Option<NaiveDate>,
    /// User id in the access-control system the export comes from.
    pub useridacces: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user_user::Entity",
        from = "Column::UserId",
        to = "user_user::Column::Id",
        on_delete = "Cascade"
    )]
    UserUser,
}

impl Related<user_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
