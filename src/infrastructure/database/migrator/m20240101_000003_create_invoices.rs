//! Create invoices table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_customers::Customers;
use super::m20240101_000002_create_consumptions::Consumptions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Invoices::ConsumptionId).integer().not_null())
                    .col(ColumnDef::new(Invoices::Rate).double().not_null())
                    .col(ColumnDef::new(Invoices::Total).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_customer")
                            .from(Invoices::Table, Invoices::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_consumption")
                            .from(Invoices::Table, Invoices::ConsumptionId)
                            .to(Consumptions::Table, Consumptions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One invoice per consumption
        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_consumption")
                    .table(Invoices::Table)
                    .col(Invoices::ConsumptionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_customer")
                    .table(Invoices::Table)
                    .col(Invoices::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Invoices {
    Table,
    Id,
    CustomerId,
    ConsumptionId,
    Rate,
    Total,
}
