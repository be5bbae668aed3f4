//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_family;
mod m20240301_000002_create_establishment;
mod m20240301_000003_create_employee;
mod m20240301_000004_create_orders;
mod m20240301_000005_create_product;
mod m20240301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_family::Migration),
            Box::new(m20240301_000002_create_establishment::Migration),
            Box::new(m20240301_000003_create_employee::Migration),
            Box::new(m20240301_000004_create_orders::Migration),
            Box::new(m20240301_000005_create_product::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000006_add_indexes::Migration),
        ]
    }
}
