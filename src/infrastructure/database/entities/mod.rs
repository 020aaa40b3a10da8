//! Database entities module

pub mod consumption;
pub mod customer;
pub mod invoice;

pub use consumption::Entity as Consumption;
pub use customer::Entity as Customer;
pub use invoice::Entity as Invoice;
