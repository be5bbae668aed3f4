//! Create `product` table with FK to `family`.
//!
//! Products are never removed; `delisted` marks a soft delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(big_integer(Product::Id).auto_increment().primary_key())
                    .col(string_len(Product::Name, 128).not_null())
                    .col(double(Product::Price).not_null())
                    .col(date(Product::CreatedOn).not_null())
                    .col(ColumnDef::new(Product::Description).text().null())
                    .col(ColumnDef::new(Product::FamilyId).big_integer().null())
                    .col(boolean(Product::Delisted).not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_family")
                            .from(Product::Table, Product::FamilyId)
                            .to(Family::Table, Family::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    Price,
    CreatedOn,
    Description,
    FamilyId,
    Delisted,
}

#[derive(DeriveIden)]
enum Family { Table, Id }
