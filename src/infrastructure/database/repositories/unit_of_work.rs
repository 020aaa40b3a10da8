//! Transactional scope over the consumption and invoice tables

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use tracing::debug;

use super::consumption_repository::insert_consumption;
use super::db_err;
use super::invoice_repository::{insert_invoice, select_invoices};
use crate::domain::consumption::{Consumption, ConsumptionRepository, NewConsumption};
use crate::domain::invoice::{Invoice, InvoiceRepository, NewInvoice};
use crate::domain::{DomainResult, UnitOfWork};

/// A SeaORM transaction. Dropped without commit, it rolls back.
pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

impl SeaOrmUnitOfWork {
    pub fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl ConsumptionRepository for SeaOrmUnitOfWork {
    async fn save(&self, consumption: NewConsumption) -> DomainResult<Consumption> {
        insert_consumption(&self.txn, consumption).await
    }
}

#[async_trait]
impl InvoiceRepository for SeaOrmUnitOfWork {
    async fn save(&self, invoice: NewInvoice) -> DomainResult<Invoice> {
        insert_invoice(&self.txn, invoice).await
    }

    async fn find_all(&self) -> DomainResult<Vec<Invoice>> {
        select_invoices(&self.txn).await
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn consumptions(&self) -> &dyn ConsumptionRepository {
        self
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        self
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.txn.commit().await.map_err(db_err)?;
        debug!("Unit of work committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.txn.rollback().await.map_err(db_err)?;
        debug!("Unit of work rolled back");
        Ok(())
    }
}
