//! Create `family` table.
//!
//! Product categories; surrogate id assigned by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Family::Table)
                    .if_not_exists()
                    .col(big_integer(Family::Id).auto_increment().primary_key())
                    .col(string_len(Family::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Family::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Family { Table, Id, Name }
