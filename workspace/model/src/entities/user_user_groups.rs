use super::user_user;
use sea_orm::entity::prelude::*;

/// Group membership of an account (Django's `User.groups` join table).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_user_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub group_id: i32,
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
