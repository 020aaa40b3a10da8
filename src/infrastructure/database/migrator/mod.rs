//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_customers;
mod m20240101_000002_create_consumptions;
mod m20240101_000003_create_invoices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers::Migration),
            Box::new(m20240101_000002_create_consumptions::Migration),
            Box::new(m20240101_000003_create_invoices::Migration),
        ]
    }
}
