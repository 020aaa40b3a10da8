//! # Voltix Billing
//!
//! Electricity billing back-office: customer registration, consumption
//! periods and invoices priced with a tiered per-kWh tariff.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, tariff rules and repository traits
//! - **application**: Customer and invoice services
//! - **infrastructure**: SeaORM persistence and the in-memory store
//! - **shared**: Error types and input validation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export services and database types for easy access
pub use application::{CustomerService, InvoiceService};
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
