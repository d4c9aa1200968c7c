use sea_orm::entity::prelude::*;

/// A login account of the point-of-sale application.
/// Columns mirror the Django `user.User` model the application is built on.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Django-formatted password hash, never the raw card number.
    pub password: String,
    pub last_login: Option<DateTimeUtc>,
    pub is_superuser: bool,
    /// Display name, "name lastname".
    pub names: String,
    /// Zero-padded card number.
    #[sea_orm(unique)]
    pub username: String,
    pub image: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTimeUtc,
    pub is_change_password: bool,
    pub email_reset_token: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every member account has exactly one client profile.
    #[sea_orm(has_one = "super::pos_client::Entity")]
    PosClient,
    #[sea_orm(has_many = "super::user_user_groups::Entity")]
    UserUserGroups,
}

impl Related<super::pos_client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PosClient.def()
    }
}

impl Related<super::user_user_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserUserGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
