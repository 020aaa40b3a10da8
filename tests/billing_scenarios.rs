//! End-to-end billing flows against a migrated in-memory SQLite database.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;

use voltix_billing::domain::{NewCustomer, RepositoryProvider};
use voltix_billing::infrastructure::database::entities::{consumption, invoice};
use voltix_billing::infrastructure::database::migrator::Migrator;
use voltix_billing::{
    init_database, CustomerService, DatabaseConfig, InvoiceService, SeaOrmRepositoryProvider,
};

struct Harness {
    db: DatabaseConnection,
    customers: CustomerService,
    invoices: InvoiceService,
}

async fn harness() -> Harness {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    Harness {
        customers: CustomerService::new(repos.clone()),
        invoices: InvoiceService::new(repos),
        db,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn row_counts(db: &DatabaseConnection) -> (u64, u64) {
    let consumptions = consumption::Entity::find().count(db).await.unwrap();
    let invoices = invoice::Entity::find().count(db).await.unwrap();
    (consumptions, invoices)
}

#[tokio::test]
async fn register_bill_and_list() {
    let h = harness().await;

    let ana = h
        .customers
        .register_customer(NewCustomer::new("Ana", "Main St 1", "ana@x.com", "555-0001"))
        .await
        .unwrap();
    assert!(ana.id > 0);

    let invoice = h
        .invoices
        .generate_invoice_for_period(&ana, 250.0, date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(invoice.applied_rate(), 0.15);
    assert_eq!(invoice.total_to_pay(), 37.5);

    let listed = h.invoices.list_invoices().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), invoice.id());
    assert_eq!(listed[0].customer().name, "Ana");
    assert_eq!(listed[0].consumption().kwh, 250.0);
    assert_eq!(listed[0].consumption().start_date, date(2024, 1, 1));
    assert_eq!(listed[0].consumption().end_date, date(2024, 1, 31));
}

#[tokio::test]
async fn rejected_requests_leave_no_rows() {
    let h = harness().await;
    let ana = h
        .customers
        .register_customer(NewCustomer::new("Ana", "Main St 1", "ana@x.com", "555-0001"))
        .await
        .unwrap();

    let zero = h
        .invoices
        .generate_invoice_for_period(&ana, 0.0, date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap_err();
    assert!(zero.is_validation());
    assert_eq!(zero.user_message(), "kWh must be greater than zero.");

    let inverted = h
        .invoices
        .generate_invoice_for_period(&ana, 50.0, date(2024, 2, 1), date(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(inverted.is_validation());
    assert_eq!(
        inverted.user_message(),
        "End date cannot be before start date."
    );

    assert_eq!(row_counts(&h.db).await, (0, 0));
}

#[tokio::test]
async fn infinite_volume_is_rejected() {
    let h = harness().await;
    let ana = h
        .customers
        .register_customer(NewCustomer::new("Ana", "Main St 1", "ana@x.com", "555-0001"))
        .await
        .unwrap();

    let err = h
        .invoices
        .generate_invoice_for_period(&ana, f64::INFINITY, date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(h.invoices.list_invoices().await.unwrap().is_empty());
    assert_eq!(row_counts(&h.db).await, (0, 0));
}

#[tokio::test]
async fn blank_customer_fields_are_rejected() {
    let h = harness().await;

    let err = h
        .customers
        .register_customer(NewCustomer::new("  ", "Main St 1", "ana@x.com", "555-0001"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(h.customers.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_customer_leaves_no_orphan_consumption() {
    let h = harness().await;
    let ghost = NewCustomer::new("Ghost", "Nowhere", "g@x.com", "000").with_id(4242);

    let err = h
        .invoices
        .generate_invoice_for_period(&ghost, 120.0, date(2024, 3, 1), date(2024, 3, 31))
        .await
        .unwrap_err();

    assert!(err.is_persistence());
    assert_eq!(row_counts(&h.db).await, (0, 0));
}

#[tokio::test]
async fn listing_follows_generation_order() {
    let h = harness().await;
    let ana = h
        .customers
        .register_customer(NewCustomer::new("Ana", "Main St 1", "ana@x.com", "555-0001"))
        .await
        .unwrap();
    let bruno = h
        .customers
        .register_customer(NewCustomer::new("Bruno", "Oak Ave 9", "bruno@x.com", "555-0002"))
        .await
        .unwrap();

    h.invoices
        .generate_invoice_for_period(&bruno, 400.0, date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();
    h.invoices
        .generate_invoice_for_period(&ana, 80.0, date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();

    let listed = h.invoices.list_invoices().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|i| i.customer().name.as_str()).collect();
    assert_eq!(names, ["Bruno", "Ana"]);
    assert_eq!(listed[0].applied_rate(), 0.20);
    assert_eq!(listed[1].applied_rate(), 0.12);
    assert_eq!(row_counts(&h.db).await, (2, 2));
}
