pub mod consumption;
pub mod customer;
pub mod invoice;
pub mod repositories;
pub mod tariff;

// Re-export commonly used types
pub use consumption::{Consumption, ConsumptionRepository, NewConsumption};
pub use customer::{Customer, CustomerRepository, NewCustomer};
pub use invoice::{Invoice, InvoiceRepository, NewInvoice};
pub use repositories::{DomainResult, RepositoryProvider, UnitOfWork};
pub use tariff::{TariffCalculator, TariffQuote, TariffTier};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
