//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::{debug, info};

use super::db_err;
use crate::domain::customer::{Customer, CustomerRepository, NewCustomer};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::customer;

fn entity_to_domain(c: customer::Model) -> Customer {
    Customer {
        id: c.id,
        name: c.name,
        address: c.address,
        email: c.email,
        phone: c.phone,
    }
}

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn save(&self, c: NewCustomer) -> DomainResult<Customer> {
        let model = customer::ActiveModel {
            name: Set(c.name),
            address: Set(c.address),
            email: Set(c.email),
            phone: Set(c.phone),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(customer_id = result.id, "Customer saved");
        Ok(entity_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if model.is_none() {
            debug!(customer_id = id, "Customer not found");
        }
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }
}
