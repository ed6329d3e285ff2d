//! Migrator creating the catalog schema in foreign-key order.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_location;
mod m20240101_000002_create_user;
mod m20240101_000003_create_user_location;
mod m20240101_000004_create_category;
mod m20240101_000005_create_ad;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_location::Migration),
            Box::new(m20240101_000002_create_user::Migration),
            Box::new(m20240101_000003_create_user_location::Migration),
            Box::new(m20240101_000004_create_category::Migration),
            Box::new(m20240101_000005_create_ad::Migration),
        ]
    }
}
