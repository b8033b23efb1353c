//! Create `tour_package` table.
//!
//! Keyed by a short code; tours reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourPackage::Table)
                    .if_not_exists()
                    .col(string_len(TourPackage::Code, 8).primary_key())
                    .col(string_len(TourPackage::Name, 64).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TourPackage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TourPackage { Table, Code, Name }
