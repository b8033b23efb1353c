//! Create `tour` table.
//! Difficulty and region are stored as their string values.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tour::Table)
                    .if_not_exists()
                    .col(pk_auto(Tour::Id))
                    .col(string_len(Tour::Title, 128).not_null())
                    .col(text(Tour::Description).not_null())
                    .col(text(Tour::Blurb).not_null())
                    .col(integer(Tour::Price).not_null())
                    .col(string_len(Tour::Duration, 32).not_null())
                    .col(text(Tour::Bullets).not_null())
                    .col(text(Tour::Keywords).not_null())
                    .col(string_len(Tour::TourPackageCode, 8).not_null())
                    .col(string_len(Tour::Difficulty, 16).not_null())
                    .col(string_len(Tour::Region, 32).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_tour_package")
                            .from(Tour::Table, Tour::TourPackageCode)
                            .to(TourPackage::Table, TourPackage::Code)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tour::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tour {
    Table,
    Id,
    Title,
    Description,
    Blurb,
    Price,
    Duration,
    Bullets,
    Keywords,
    TourPackageCode,
    Difficulty,
    Region,
}

#[derive(DeriveIden)]
enum TourPackage { Table, Code }
