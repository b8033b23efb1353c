//! Create `tour_rating` table.
//! One row per (tour, customer); the pair is made unique in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourRating::Table)
                    .if_not_exists()
                    .col(pk_auto(TourRating::Id))
                    .col(integer(TourRating::TourId).not_null())
                    .col(integer(TourRating::CustomerId).not_null())
                    .col(integer(TourRating::Score).not_null())
                    .col(string_len_null(TourRating::Comment, 255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_rating_tour")
                            .from(TourRating::Table, TourRating::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TourRating::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TourRating { Table, Id, TourId, CustomerId, Score, Comment }

#[derive(DeriveIden)]
enum Tour { Table, Id }
