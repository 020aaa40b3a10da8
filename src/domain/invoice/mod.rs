//! Invoice aggregate
//!
//! Contains the Invoice entity and repository interface.

pub mod model;
pub mod repository;

pub use model::{Invoice, NewInvoice};
pub use repository::InvoiceRepository;
