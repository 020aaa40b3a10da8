//! Create consumptions table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Consumptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Consumptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Consumptions::Kwh).double().not_null())
                    .col(ColumnDef::new(Consumptions::StartDate).date().not_null())
                    .col(ColumnDef::new(Consumptions::EndDate).date().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Consumptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Consumptions {
    Table,
    Id,
    Kwh,
    StartDate,
    EndDate,
}
