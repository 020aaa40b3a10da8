//! Customer aggregate
//!
//! Contains the Customer entity and repository interface.

pub mod model;
pub mod repository;

pub use model::{Customer, NewCustomer};
pub use repository::CustomerRepository;
