//! Customer registration service

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Customer, DomainError, DomainResult, NewCustomer, RepositoryProvider};

/// Service for customer operations
pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Validate and store a new customer, returning it with its generated id.
    ///
    /// Nothing is written when any required field is blank.
    pub async fn register_customer(&self, customer: NewCustomer) -> DomainResult<Customer> {
        info!(name = customer.name.as_str(), "Registering new customer");

        if let Err(e) = customer.validate() {
            warn!(error = %e, "Customer registration rejected");
            return Err(e);
        }

        let saved = self.repos.customers().save(customer).await?;
        info!(customer_id = saved.id, "Customer registered");
        Ok(saved)
    }

    pub async fn list_customers(&self) -> DomainResult<Vec<Customer>> {
        info!("Listing all customers");
        self.repos.customers().find_all().await
    }

    pub async fn get_customer(&self, id: i32) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: id.to_string(),
            })
    }
}
