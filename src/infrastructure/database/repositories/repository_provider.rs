//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::domain::consumption::ConsumptionRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::invoice::InvoiceRepository;
use crate::domain::{DomainResult, RepositoryProvider, UnitOfWork};

use super::consumption_repository::SeaOrmConsumptionRepository;
use super::customer_repository::SeaOrmCustomerRepository;
use super::db_err;
use super::invoice_repository::SeaOrmInvoiceRepository;
use super::unit_of_work::SeaOrmUnitOfWork;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let customers = repos.customers().find_all().await?;
/// let uow = repos.begin().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    customers: SeaOrmCustomerRepository,
    consumptions: SeaOrmConsumptionRepository,
    invoices: SeaOrmInvoiceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: SeaOrmCustomerRepository::new(db.clone()),
            consumptions: SeaOrmConsumptionRepository::new(db.clone()),
            invoices: SeaOrmInvoiceRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn consumptions(&self) -> &dyn ConsumptionRepository {
        &self.consumptions
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        &self.invoices
    }

    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(Box::new(SeaOrmUnitOfWork::new(txn)))
    }
}
