use sea_orm_migration::prelude::*;

mod m20250101_000001_create_identity_tables;
mod m20250101_000002_create_salon_tables;
mod m20250101_000003_create_cancellation_tokens_table;

/// Database migrator
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_identity_tables::Migration),
            Box::new(m20250101_000002_create_salon_tables::Migration),
            Box::new(m20250101_000003_create_cancellation_tokens_table::Migration),
        ]
    }
}
