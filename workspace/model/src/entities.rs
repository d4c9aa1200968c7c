//! SeaORM entities for the tables the member synchronization writes to.
//! The tables belong to the point-of-sale application; their schema is owned
//! there and mirrored here only as far as the synchronization needs it.

pub mod pos_client;
pub mod user_user;
pub mod user_user_groups;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::pos_client::Entity as PosClient;
    pub use super::user_user::Entity as UserUser;
    pub use super::user_user_groups::Entity as UserUserGroups;
}
