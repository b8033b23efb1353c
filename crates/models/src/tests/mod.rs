


use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};
use crate::{tour, tour_package};
use crate::tour::{Difficulty, NewTour, Region};

/// Fresh in-memory SQLite database with all migrations applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn new_tour(title: &str, package_code: &str, difficulty: Difficulty) -> NewTour {
    NewTour {
        title: title.to_string(),
        description: format!("{title} description"),
        blurb: format!("{title} blurb"),
        price: 350,
        duration: "3 days".into(),
        bullets: "Hike, Eat, Sleep".into(),
        keywords: "hiking, coast".into(),
        tour_package_code: package_code.to_string(),
        difficulty,
        region: Region::CentralCoast,
    }
}

/// Integration tests combining multiple components
pub mod integration_tests {
    use super::*;
    use crate::tour_rating;
    use sea_orm::{EntityTrait, ModelTrait};

    /// Test complete workflow: package -> tour -> ratings
    #[tokio::test]
    async fn test_complete_workflow() -> Result<()> {
        let db = setup_test_db().await?;

        let pkg = tour_package::create(&db, "BC", "Backpack Cal").await?;
        let t = tour::create(&db, new_tour("Big Sur Retreat", &pkg.code, Difficulty::Medium)).await?;
        let r1 = tour_rating::create(&db, t.id, 1, 5, Some("great".into())).await?;
        let r2 = tour_rating::create(&db, t.id, 2, 3, None).await?;

        // Verify all entities exist and are properly linked
        let found_pkg = t.find_related(tour_package::Entity).one(&db).await?;
        assert_eq!(found_pkg.map(|p| p.code), Some("BC".to_string()));

        let ratings = t.find_related(tour_rating::Entity).all(&db).await?;
        let ids: Vec<i32> = ratings.iter().map(|r| r.id).collect();
        assert!(ids.contains(&r1.id));
        assert!(ids.contains(&r2.id));

        // Deleting the tour cascades to its ratings
        tour::Entity::delete_by_id(t.id).exec(&db).await?;
        assert!(tour_rating::Entity::find_by_id(r1.id).one(&db).await?.is_none());
        Ok(())
    }
}
