//! SeaORM implementation of ConsumptionRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set};
use tracing::info;

use super::db_err;
use crate::domain::consumption::{Consumption, ConsumptionRepository, NewConsumption};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::consumption;

/// Insert on any connection, plain or transactional
pub(crate) async fn insert_consumption<C>(conn: &C, c: NewConsumption) -> DomainResult<Consumption>
where
    C: ConnectionTrait,
{
    let model = consumption::ActiveModel {
        kwh: Set(c.kwh),
        start_date: Set(c.start_date),
        end_date: Set(c.end_date),
        ..Default::default()
    };
    let result = model.insert(conn).await.map_err(db_err)?;
    info!(consumption_id = result.id, kwh = result.kwh, "Consumption saved");
    Ok(Consumption {
        id: result.id,
        kwh: result.kwh,
        start_date: result.start_date,
        end_date: result.end_date,
    })
}

pub struct SeaOrmConsumptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmConsumptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConsumptionRepository for SeaOrmConsumptionRepository {
    async fn save(&self, consumption: NewConsumption) -> DomainResult<Consumption> {
        insert_consumption(&self.db, consumption).await
    }
}
