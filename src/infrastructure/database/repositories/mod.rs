//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod consumption_repository;
pub mod customer_repository;
pub mod invoice_repository;
pub mod repository_provider;
pub mod unit_of_work;

pub use consumption_repository::SeaOrmConsumptionRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use invoice_repository::SeaOrmInvoiceRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use unit_of_work::SeaOrmUnitOfWork;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(format!("Database error: {}", e))
}
