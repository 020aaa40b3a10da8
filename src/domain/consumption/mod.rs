//! Consumption aggregate
//!
//! Contains the metered consumption period and repository interface.

pub mod model;
pub mod repository;

pub use model::{Consumption, NewConsumption};
pub use repository::ConsumptionRepository;
