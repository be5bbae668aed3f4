use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Establishment: lookups by province
        manager
            .create_index(
                Index::create()
                    .name("idx_establishment_province")
                    .table(Establishment::Table)
                    .col(Establishment::Province)
                    .to_owned(),
            )
            .await?;

        // Product: join on family for the catalog projection
        manager
            .create_index(
                Index::create()
                    .name("idx_product_family")
                    .table(Product::Table)
                    .col(Product::FamilyId)
                    .to_owned(),
            )
            .await?;

        // Orders: joins for the order projection
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_establishment")
                    .table(Orders::Table)
                    .col(Orders::EstablishmentTaxId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_employee")
                    .table(Orders::Table)
                    .col(Orders::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_orders_employee").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_establishment").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_family").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_establishment_province").table(Establishment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Establishment { Table, Province }

#[derive(DeriveIden)]
enum Product { Table, FamilyId }

#[derive(DeriveIden)]
enum Orders { Table, EstablishmentTaxId, EmployeeId }
