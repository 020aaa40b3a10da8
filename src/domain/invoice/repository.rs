//! Invoice repository interface

use async_trait::async_trait;

use super::model::{Invoice, NewInvoice};
use crate::domain::DomainResult;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert referencing the customer and consumption ids
    async fn save(&self, invoice: NewInvoice) -> DomainResult<Invoice>;
    /// All invoices joined with their customer and consumption
    async fn find_all(&self) -> DomainResult<Vec<Invoice>>;
}
