//! Invoice generation service

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::domain::{
    Customer, DomainError, DomainResult, Invoice, NewConsumption, NewInvoice, RepositoryProvider,
    UnitOfWork,
};

/// Steps of a single invoice generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Validating,
    ConsumptionPersisting,
    Computing,
    InvoicePersisting,
    Done,
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "validating"),
            Self::ConsumptionPersisting => write!(f, "consumption_persisting"),
            Self::Computing => write!(f, "computing"),
            Self::InvoicePersisting => write!(f, "invoice_persisting"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Prefix persistence failures with the stage they happened in
fn stage_failed(stage: GenerationStage, err: DomainError) -> DomainError {
    match err {
        DomainError::Persistence(msg) => {
            error!(%stage, error = msg.as_str(), "Invoice generation failed");
            DomainError::Persistence(format!("{}: {}", stage, msg))
        }
        other => other,
    }
}

/// Service for invoice operations
pub struct InvoiceService {
    repos: Arc<dyn RepositoryProvider>,
}

impl InvoiceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Store the consumption, price it and store the invoice.
    ///
    /// Both inserts share one unit of work: a failure at either leaves no
    /// rows behind. Invalid input is rejected before anything is written.
    pub async fn generate_invoice(
        &self,
        customer: &Customer,
        consumption: NewConsumption,
    ) -> DomainResult<Invoice> {
        info!(
            customer_id = customer.id,
            kwh = consumption.kwh,
            "Generating invoice"
        );

        if let Err(e) = consumption.validate() {
            warn!(
                stage = %GenerationStage::Validating,
                customer_id = customer.id,
                error = %e,
                "Invoice request rejected"
            );
            return Err(e);
        }

        let uow = self
            .repos
            .begin()
            .await
            .map_err(|e| stage_failed(GenerationStage::ConsumptionPersisting, e))?;

        match Self::persist(&*uow, customer, consumption).await {
            Ok(invoice) => {
                uow.commit()
                    .await
                    .map_err(|e| stage_failed(GenerationStage::InvoicePersisting, e))?;
                info!(
                    stage = %GenerationStage::Done,
                    invoice_id = invoice.id(),
                    customer_id = customer.id,
                    rate = invoice.applied_rate(),
                    total = invoice.total_to_pay(),
                    "Invoice generated"
                );
                Ok(invoice)
            }
            Err(e) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(error = %rollback_err, "Rollback after failed invoice generation failed");
                }
                Err(e)
            }
        }
    }

    /// Same as [`generate_invoice`](Self::generate_invoice) from raw values
    pub async fn generate_invoice_for_period(
        &self,
        customer: &Customer,
        kwh: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DomainResult<Invoice> {
        self.generate_invoice(customer, NewConsumption::new(kwh, start_date, end_date))
            .await
    }

    /// Every invoice with its customer and consumption, each read a fresh copy
    pub async fn list_invoices(&self) -> DomainResult<Vec<Invoice>> {
        info!("Listing all invoices");
        self.repos.invoices().find_all().await
    }

    async fn persist(
        uow: &dyn UnitOfWork,
        customer: &Customer,
        consumption: NewConsumption,
    ) -> DomainResult<Invoice> {
        let consumption = uow
            .consumptions()
            .save(consumption)
            .await
            .map_err(|e| stage_failed(GenerationStage::ConsumptionPersisting, e))?;

        let pending = NewInvoice::priced(customer.clone(), consumption);
        debug!(
            stage = %GenerationStage::Computing,
            consumption_id = pending.consumption().id,
            rate = pending.applied_rate(),
            total = pending.total_to_pay(),
            "Tariff applied"
        );

        uow.invoices()
            .save(pending)
            .await
            .map_err(|e| stage_failed(GenerationStage::InvoicePersisting, e))
    }
}
