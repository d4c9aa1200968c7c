pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_user_user;
mod m20240601_000002_create_pos_client;
mod m20240601_000003_create_user_user_groups;
pub mod entity_iden;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_user_user::Migration),
            Box::new(m20240601_000002_create_pos_client::Migration),
            Box::new(m20240601_000003_create_user_user_groups::Migration),
        ]
    }
}
