//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `UnitOfWork`: transactional scope over the invoice-generation writes
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::consumption::ConsumptionRepository;
use super::customer::CustomerRepository;
use super::invoice::InvoiceRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let customers = repos.customers().find_all().await?;
///     let invoices = repos.invoices().find_all().await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn consumptions(&self) -> &dyn ConsumptionRepository;
    fn invoices(&self) -> &dyn InvoiceRepository;

    /// Open a transactional scope. Nothing written through it is visible
    /// to other readers until [`UnitOfWork::commit`].
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;
}

// ── UnitOfWork ──────────────────────────────────────────────────

/// Writes that must land together.
///
/// Dropping a unit of work without committing discards its writes.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn consumptions(&self) -> &dyn ConsumptionRepository;
    fn invoices(&self) -> &dyn InvoiceRepository;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}
