//! In-memory storage implementation

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{
    Consumption, ConsumptionRepository, Customer, CustomerRepository, DomainError, DomainResult,
    Invoice, InvoiceRepository, NewConsumption, NewCustomer, NewInvoice, RepositoryProvider,
    UnitOfWork,
};

/// Stored invoice row, referencing its customer and consumption by id
#[derive(Debug, Clone)]
struct InvoiceRecord {
    id: i32,
    customer_id: i32,
    consumption_id: i32,
    rate: f64,
    total: f64,
}

#[derive(Default)]
struct Tables {
    customers: DashMap<i32, Customer>,
    consumptions: DashMap<i32, Consumption>,
    invoices: DashMap<i32, InvoiceRecord>,
    customer_counter: AtomicI32,
    consumption_counter: AtomicI32,
    invoice_counter: AtomicI32,
    writes: AtomicUsize,
    fail_consumption_writes: AtomicBool,
    fail_invoice_writes: AtomicBool,
}

impl Tables {
    fn next_id(counter: &AtomicI32) -> i32 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn stage_consumption(&self, c: NewConsumption) -> DomainResult<Consumption> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_consumption_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence(
                "consumption insert rejected".to_string(),
            ));
        }
        Ok(c.with_id(Self::next_id(&self.consumption_counter)))
    }

    /// Enforces the foreign keys and the one-invoice-per-consumption index.
    /// `staged` holds uncommitted consumptions visible to the caller.
    fn stage_invoice(
        &self,
        pending: &NewInvoice,
        staged: &[Consumption],
        staged_invoices: &[InvoiceRecord],
    ) -> DomainResult<InvoiceRecord> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_invoice_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("invoice insert rejected".to_string()));
        }

        let customer_id = pending.customer().id;
        let consumption_id = pending.consumption().id;
        if !self.customers.contains_key(&customer_id) {
            return Err(DomainError::Persistence(format!(
                "foreign key violation: customer {} does not exist",
                customer_id
            )));
        }
        let consumption_known = self.consumptions.contains_key(&consumption_id)
            || staged.iter().any(|c| c.id == consumption_id);
        if !consumption_known {
            return Err(DomainError::Persistence(format!(
                "foreign key violation: consumption {} does not exist",
                consumption_id
            )));
        }
        if self.is_invoiced(consumption_id)
            || staged_invoices.iter().any(|i| i.consumption_id == consumption_id)
        {
            return Err(Self::already_invoiced(consumption_id));
        }

        Ok(InvoiceRecord {
            id: Self::next_id(&self.invoice_counter),
            customer_id,
            consumption_id,
            rate: pending.applied_rate(),
            total: pending.total_to_pay(),
        })
    }

    fn is_invoiced(&self, consumption_id: i32) -> bool {
        self.invoices.iter().any(|i| i.consumption_id == consumption_id)
    }

    fn already_invoiced(consumption_id: i32) -> DomainError {
        DomainError::Persistence(format!(
            "unique violation: consumption {} already invoiced",
            consumption_id
        ))
    }

    /// Inner join of invoices with customers and consumptions, by invoice id
    fn join_invoices(&self, extra: &[InvoiceRecord], staged: &[Consumption]) -> Vec<Invoice> {
        let mut records: Vec<InvoiceRecord> = self.invoices.iter().map(|r| r.clone()).collect();
        records.extend(extra.iter().cloned());
        records.sort_by_key(|r| r.id);

        records
            .into_iter()
            .filter_map(|r| {
                let customer = self.customers.get(&r.customer_id)?.clone();
                let consumption = self
                    .consumptions
                    .get(&r.consumption_id)
                    .map(|c| c.clone())
                    .or_else(|| staged.iter().find(|c| c.id == r.consumption_id).cloned())?;
                Some(Invoice::from_storage(r.id, customer, consumption, r.rate, r.total))
            })
            .collect()
    }
}

/// In-memory repositories for development and testing.
///
/// Mirrors the relational store: generated ids start at 1, invoices must
/// reference existing rows, and unit-of-work writes only land on commit.
#[derive(Clone, Default)]
pub struct InMemoryRepositoryProvider {
    tables: Arc<Tables>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insert attempts made so far, successful or not
    pub fn write_count(&self) -> usize {
        self.tables.writes.load(Ordering::SeqCst)
    }

    pub fn consumption_count(&self) -> usize {
        self.tables.consumptions.len()
    }

    pub fn invoice_count(&self) -> usize {
        self.tables.invoices.len()
    }

    /// Make every following consumption insert fail with a persistence error
    pub fn fail_consumption_writes(&self, fail: bool) {
        self.tables
            .fail_consumption_writes
            .store(fail, Ordering::SeqCst);
    }

    /// Make every following invoice insert fail with a persistence error
    pub fn fail_invoice_writes(&self, fail: bool) {
        self.tables.fail_invoice_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRepositoryProvider {
    async fn save(&self, customer: NewCustomer) -> DomainResult<Customer> {
        self.tables.writes.fetch_add(1, Ordering::SeqCst);
        let saved = customer.with_id(Tables::next_id(&self.tables.customer_counter));
        self.tables.customers.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        Ok(self.tables.customers.get(&id).map(|c| c.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let mut all: Vec<Customer> = self.tables.customers.iter().map(|c| c.clone()).collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }
}

#[async_trait]
impl ConsumptionRepository for InMemoryRepositoryProvider {
    async fn save(&self, consumption: NewConsumption) -> DomainResult<Consumption> {
        let saved = self.tables.stage_consumption(consumption)?;
        self.tables.consumptions.insert(saved.id, saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryRepositoryProvider {
    async fn save(&self, invoice: NewInvoice) -> DomainResult<Invoice> {
        let record = self.tables.stage_invoice(&invoice, &[], &[])?;
        let id = record.id;
        self.tables.invoices.insert(id, record);
        Ok(invoice.with_id(id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Invoice>> {
        Ok(self.tables.join_invoices(&[], &[]))
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        self
    }

    fn consumptions(&self) -> &dyn ConsumptionRepository {
        self
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        self
    }

    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork {
            tables: self.tables.clone(),
            staged: Mutex::new(Staged::default()),
        }))
    }
}

// ── Unit of work ────────────────────────────────────────────────

#[derive(Default)]
struct Staged {
    consumptions: Vec<Consumption>,
    invoices: Vec<InvoiceRecord>,
}

/// Buffers writes until commit
pub struct InMemoryUnitOfWork {
    tables: Arc<Tables>,
    staged: Mutex<Staged>,
}

#[async_trait]
impl ConsumptionRepository for InMemoryUnitOfWork {
    async fn save(&self, consumption: NewConsumption) -> DomainResult<Consumption> {
        let saved = self.tables.stage_consumption(consumption)?;
        self.staged.lock().await.consumptions.push(saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryUnitOfWork {
    async fn save(&self, invoice: NewInvoice) -> DomainResult<Invoice> {
        let mut staged = self.staged.lock().await;
        let record = self
            .tables
            .stage_invoice(&invoice, &staged.consumptions, &staged.invoices)?;
        let id = record.id;
        staged.invoices.push(record);
        Ok(invoice.with_id(id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Invoice>> {
        let staged = self.staged.lock().await;
        Ok(self
            .tables
            .join_invoices(&staged.invoices, &staged.consumptions))
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn consumptions(&self) -> &dyn ConsumptionRepository {
        self
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        self
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let InMemoryUnitOfWork { tables, staged } = *self;
        let staged = staged.into_inner();
        // Another unit of work may have invoiced the same consumption since staging
        if let Some(dup) = staged
            .invoices
            .iter()
            .find(|i| tables.is_invoiced(i.consumption_id))
        {
            return Err(Tables::already_invoiced(dup.consumption_id));
        }
        for c in staged.consumptions {
            tables.consumptions.insert(c.id, c);
        }
        for i in staged.invoices {
            tables.invoices.insert(i.id, i);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(kwh: f64) -> NewConsumption {
        NewConsumption::new(
            kwh,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    async fn ana(repos: &InMemoryRepositoryProvider) -> Customer {
        repos
            .customers()
            .save(NewCustomer::new("Ana", "Main St 1", "ana@x.com", "555-0001"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn ids_start_at_one() {
        let repos = InMemoryRepositoryProvider::new();
        assert_eq!(ana(&repos).await.id, 1);
        assert_eq!(ana(&repos).await.id, 2);
    }

    #[tokio::test]
    async fn staged_writes_are_hidden_until_commit() {
        let repos = InMemoryRepositoryProvider::new();
        let customer = ana(&repos).await;

        let uow = repos.begin().await.unwrap();
        let consumption = uow.consumptions().save(period(10.0)).await.unwrap();
        uow.invoices()
            .save(NewInvoice::priced(customer, consumption))
            .await
            .unwrap();
        assert_eq!(uow.invoices().find_all().await.unwrap().len(), 1);
        assert!(repos.invoices().find_all().await.unwrap().is_empty());

        uow.commit().await.unwrap();
        assert_eq!(repos.invoices().find_all().await.unwrap().len(), 1);
        assert_eq!(repos.consumption_count(), 1);
    }

    #[tokio::test]
    async fn rollback_discards_staged_rows() {
        let repos = InMemoryRepositoryProvider::new();
        let customer = ana(&repos).await;

        let uow = repos.begin().await.unwrap();
        let consumption = uow.consumptions().save(period(10.0)).await.unwrap();
        uow.invoices()
            .save(NewInvoice::priced(customer, consumption))
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(repos.consumption_count(), 0);
        assert_eq!(repos.invoice_count(), 0);
    }

    #[tokio::test]
    async fn invoice_requires_known_customer() {
        let repos = InMemoryRepositoryProvider::new();
        let consumption = repos.consumptions().save(period(10.0)).await.unwrap();
        let ghost = NewCustomer::new("Ghost", "Nowhere", "g@x.com", "000").with_id(42);

        let err = repos
            .invoices()
            .save(NewInvoice::priced(ghost, consumption))
            .await
            .unwrap_err();
        assert!(err.is_persistence());
    }

    #[tokio::test]
    async fn listed_invoices_do_not_share_customer_values() {
        let repos = InMemoryRepositoryProvider::new();
        let customer = ana(&repos).await;
        for kwh in [10.0, 20.0] {
            let c = repos.consumptions().save(period(kwh)).await.unwrap();
            repos
                .invoices()
                .save(NewInvoice::priced(customer.clone(), c))
                .await
                .unwrap();
        }

        let listed = repos.invoices().find_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].customer(), listed[1].customer());
        assert!(!std::ptr::eq(listed[0].customer(), listed[1].customer()));
    }

    #[tokio::test]
    async fn commit_rejects_consumption_invoiced_by_another_unit_of_work() {
        let repos = InMemoryRepositoryProvider::new();
        let customer = ana(&repos).await;
        let consumption = repos.consumptions().save(period(10.0)).await.unwrap();

        let first = repos.begin().await.unwrap();
        let second = repos.begin().await.unwrap();
        for uow in [&first, &second] {
            uow.invoices()
                .save(NewInvoice::priced(customer.clone(), consumption.clone()))
                .await
                .unwrap();
        }

        first.commit().await.unwrap();
        let err = second.commit().await.unwrap_err();

        assert!(err.is_persistence());
        assert!(err.to_string().contains("already invoiced"));
        assert_eq!(repos.invoice_count(), 1);
    }
}
