#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use models::tour::{Difficulty, NewTour, Region};
use models::{tour, tour_package};

/// Fresh in-memory SQLite database with every migration applied.
///
/// Each call gets its own database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Insert one package and one tour in it.
pub async fn seed_tour(db: &DatabaseConnection) -> Result<tour::Model, anyhow::Error> {
    let pkg = tour_package::create(db, "CY", "Cycle California").await?;
    let t = tour::create(
        db,
        NewTour {
            title: "Coastal Ride".into(),
            description: "Ride the coast".into(),
            blurb: "Wind in your hair".into(),
            price: 450,
            duration: "3 days".into(),
            bullets: "Bikes, Beaches".into(),
            keywords: "cycling".into(),
            tour_package_code: pkg.code,
            difficulty: Difficulty::Medium,
            region: Region::CentralCoast,
        },
    )
    .await?;
    Ok(t)
}
