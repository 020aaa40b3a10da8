//! Application services

mod customer;
mod invoice;

pub use customer::CustomerService;
pub use invoice::{GenerationStage, InvoiceService};
