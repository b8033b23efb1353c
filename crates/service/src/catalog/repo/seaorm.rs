use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use models::{tour, tour::Difficulty, tour_package};

use crate::catalog::domain::{NewTour, Tour, TourPackage};
use crate::catalog::repository::{TourPackageRepository, TourRepository};
use crate::errors::ServiceError;

pub struct SeaOrmTourPackageRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TourPackageRepository for SeaOrmTourPackageRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, ServiceError> {
        Ok(tour_package::find_by_code(&self.db, code).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TourPackage>, ServiceError> {
        Ok(tour_package::find_by_name(&self.db, name).await?)
    }

    async fn insert(&self, code: &str, name: &str) -> Result<TourPackage, ServiceError> {
        Ok(tour_package::create(&self.db, code, name).await?)
    }

    async fn find_all(&self) -> Result<Vec<TourPackage>, ServiceError> {
        Ok(tour_package::list(&self.db).await?)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(tour_package::Entity::find().count(&self.db).await?)
    }
}

pub struct SeaOrmTourRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TourRepository for SeaOrmTourRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tour>, ServiceError> {
        Ok(tour::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert(&self, new: NewTour) -> Result<Tour, ServiceError> {
        Ok(tour::create(&self.db, new).await?)
    }

    async fn find_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Tour>, ServiceError> {
        Ok(tour::find_by_difficulty(&self.db, difficulty).await?)
    }

    async fn find_by_package_code(&self, code: &str) -> Result<Vec<Tour>, ServiceError> {
        Ok(tour::find_by_package_code(&self.db, code).await?)
    }

    async fn find_all(&self) -> Result<Vec<Tour>, ServiceError> {
        Ok(tour::Entity::find().order_by_asc(tour::Column::Id).all(&self.db).await?)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(tour::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::tour::Region;

    #[tokio::test]
    async fn package_and_tour_repositories_round_trip() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let packages = SeaOrmTourPackageRepository { db: db.clone() };
        let tours = SeaOrmTourRepository { db };

        packages.insert("DS", "From Desert to Sea").await?;
        let dup = packages.insert("DS", "Again").await;
        assert!(dup.is_err());
        assert_eq!(packages.count().await?, 1);
        assert_eq!(packages.find_by_name("From Desert to Sea").await?.map(|p| p.code), Some("DS".into()));

        let t = tours
            .insert(NewTour {
                title: "Palm Springs".into(),
                description: "d".into(),
                blurb: "b".into(),
                price: 900,
                duration: "2 days".into(),
                bullets: "x".into(),
                keywords: "k".into(),
                tour_package_code: "DS".into(),
                difficulty: Difficulty::Varies,
                region: Region::SouthernCalifornia,
            })
            .await?;
        assert_eq!(tours.find_by_id(t.id).await?, Some(t.clone()));
        assert_eq!(tours.find_by_difficulty(Difficulty::Varies).await?, vec![t.clone()]);
        assert_eq!(tours.find_by_package_code("DS").await?, vec![t.clone()]);
        assert_eq!(tours.find_all().await?.len(), 1);
        assert_eq!(tours.count().await?, 1);
        Ok(())
    }
}
