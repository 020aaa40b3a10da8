//! Consumption repository interface

use async_trait::async_trait;

use super::model::{Consumption, NewConsumption};
use crate::domain::DomainResult;

#[async_trait]
pub trait ConsumptionRepository: Send + Sync {
    async fn save(&self, consumption: NewConsumption) -> DomainResult<Consumption>;
}
