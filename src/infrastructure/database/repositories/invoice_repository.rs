//! SeaORM implementation of InvoiceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::consumption::Consumption;
use crate::domain::customer::Customer;
use crate::domain::invoice::{Invoice, InvoiceRepository, NewInvoice};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{consumption, customer, invoice};

/// One row of the invoices ⋈ customers ⋈ consumptions join
#[derive(Debug, FromQueryResult)]
struct InvoiceRow {
    invoice_id: i32,
    customer_id: i32,
    name: String,
    address: String,
    email: String,
    phone: String,
    consumption_id: i32,
    kwh: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    rate: f64,
    total: f64,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        let customer = Customer {
            id: row.customer_id,
            name: row.name,
            address: row.address,
            email: row.email,
            phone: row.phone,
        };
        let consumption = Consumption {
            id: row.consumption_id,
            kwh: row.kwh,
            start_date: row.start_date,
            end_date: row.end_date,
        };
        Invoice::from_storage(row.invoice_id, customer, consumption, row.rate, row.total)
    }
}

pub(crate) async fn insert_invoice<C>(conn: &C, pending: NewInvoice) -> DomainResult<Invoice>
where
    C: ConnectionTrait,
{
    let model = invoice::ActiveModel {
        customer_id: Set(pending.customer().id),
        consumption_id: Set(pending.consumption().id),
        rate: Set(pending.applied_rate()),
        total: Set(pending.total_to_pay()),
        ..Default::default()
    };
    let result = model.insert(conn).await.map_err(db_err)?;
    info!(
        invoice_id = result.id,
        customer_id = result.customer_id,
        consumption_id = result.consumption_id,
        total = result.total,
        "Invoice saved"
    );
    Ok(pending.with_id(result.id))
}

pub(crate) async fn select_invoices<C>(conn: &C) -> DomainResult<Vec<Invoice>>
where
    C: ConnectionTrait,
{
    let rows = invoice::Entity::find()
        .select_only()
        .column_as(invoice::Column::Id, "invoice_id")
        .column_as(customer::Column::Id, "customer_id")
        .column(customer::Column::Name)
        .column(customer::Column::Address)
        .column(customer::Column::Email)
        .column(customer::Column::Phone)
        .column_as(consumption::Column::Id, "consumption_id")
        .column(consumption::Column::Kwh)
        .column(consumption::Column::StartDate)
        .column(consumption::Column::EndDate)
        .column(invoice::Column::Rate)
        .column(invoice::Column::Total)
        .join(JoinType::InnerJoin, invoice::Relation::Customer.def())
        .join(JoinType::InnerJoin, invoice::Relation::Consumption.def())
        .order_by_asc(invoice::Column::Id)
        .into_model::<InvoiceRow>()
        .all(conn)
        .await
        .map_err(db_err)?;
    Ok(rows.into_iter().map(Invoice::from).collect())
}

pub struct SeaOrmInvoiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn save(&self, invoice: NewInvoice) -> DomainResult<Invoice> {
        insert_invoice(&self.db, invoice).await
    }

    async fn find_all(&self) -> DomainResult<Vec<Invoice>> {
        select_invoices(&self.db).await
    }
}
