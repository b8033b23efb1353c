use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tour: lookups by package and by difficulty
        manager
            .create_index(
                Index::create()
                    .name("idx_tour_package_code")
                    .table(Tour::Table)
                    .col(Tour::TourPackageCode)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_tour_difficulty")
                    .table(Tour::Table)
                    .col(Tour::Difficulty)
                    .to_owned(),
            )
            .await?;

        // TourPackage: lookup by name during tour import
        manager
            .create_index(
                Index::create()
                    .name("idx_tour_package_name")
                    .table(TourPackage::Table)
                    .col(TourPackage::Name)
                    .to_owned(),
            )
            .await?;

        // TourRating: one rating per (tour_id, customer_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_tour_rating_tour_customer")
                    .table(TourRating::Table)
                    .col(TourRating::TourId)
                    .col(TourRating::CustomerId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tour_package_code").table(Tour::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tour_difficulty").table(Tour::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tour_package_name").table(TourPackage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_tour_rating_tour_customer").table(TourRating::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tour { Table, TourPackageCode, Difficulty }

#[derive(DeriveIden)]
enum TourPackage { Table, Name }

#[derive(DeriveIden)]
enum TourRating { Table, TourId, CustomerId }
