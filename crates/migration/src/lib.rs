//! Migrator for the company schema.
//! The table (with its unique ISIN index) must exist before the reference rows are seeded.
pub use sea_orm_migration::prelude::*;

mod m20250215_000001_create_company;
mod m20250215_000002_seed_company;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250215_000001_create_company::Migration),
            Box::new(m20250215_000002_seed_company::Migration),
        ]
    }
}
