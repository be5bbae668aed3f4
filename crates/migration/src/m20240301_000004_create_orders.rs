//! Create `orders` table with FKs to `establishment` and `employee`.
//!
//! Status is stored as its upper-snake string value.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(big_integer(Orders::Id).auto_increment().primary_key())
                    .col(timestamp_with_time_zone(Orders::PlacedAt).not_null())
                    .col(ColumnDef::new(Orders::Notes).text().null())
                    .col(string_len(Orders::EstablishmentTaxId, 32).not_null())
                    .col(big_integer(Orders::EmployeeId).not_null())
                    .col(string_len(Orders::Status, 32).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_establishment")
                            .from(Orders::Table, Orders::EstablishmentTaxId)
                            .to(Establishment::Table, Establishment::TaxId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_employee")
                            .from(Orders::Table, Orders::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    PlacedAt,
    Notes,
    EstablishmentTaxId,
    EmployeeId,
    Status,
}

#[derive(DeriveIden)]
enum Establishment { Table, TaxId }

#[derive(DeriveIden)]
enum Employee { Table, Id }
