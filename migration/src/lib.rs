pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_user;
mod m20240901_000002_create_profile;
mod m20240901_000003_create_social;
mod m20240901_000004_create_post;
mod m20240901_000005_create_notification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_user::Migration),
            Box::new(m20240901_000002_create_profile::Migration),
            Box::new(m20240901_000003_create_social::Migration),
            Box::new(m20240901_000004_create_post::Migration),
            Box::new(m20240901_000005_create_notification::Migration),
        ]
    }
}
