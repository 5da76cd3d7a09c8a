//! Migrator registering the catalog schema.
//! Tables have no foreign keys between them, so order only matters for readability.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_product;
mod m20240101_000003_create_service;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_product::Migration),
            Box::new(m20240101_000003_create_service::Migration),
        ]
    }
}
