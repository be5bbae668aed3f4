//! Create `establishment` table.
//!
//! Keyed by tax id; address and contact details are flattened into columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Establishment::Table)
                    .if_not_exists()
                    .col(string_len(Establishment::TaxId, 32).primary_key())
                    .col(string_len(Establishment::Name, 128).not_null())
                    .col(ColumnDef::new(Establishment::OpenedOn).date().null())
                    .col(string_len(Establishment::Street, 256).not_null())
                    .col(string_len(Establishment::City, 128).not_null())
                    .col(string_len(Establishment::PostalCode, 16).not_null())
                    .col(string_len(Establishment::Province, 128).not_null())
                    .col(string_len(Establishment::Country, 128).not_null())
                    .col(ColumnDef::new(Establishment::Phone).string_len(32).null())
                    .col(ColumnDef::new(Establishment::Email).string_len(255).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Establishment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Establishment {
    Table,
    TaxId,
    Name,
    OpenedOn,
    Street,
    City,
    PostalCode,
    Province,
    Country,
    Phone,
    Email,
}
