use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::catalog::repo::seaorm::{SeaOrmTourPackageRepository, SeaOrmTourRepository};
use service::catalog::repository::mock::{MockTourPackageRepository, MockTourRepository};
use service::catalog::repository::{TourPackageRepository, TourRepository};
use service::catalog::{TourPackageService, TourService};
use service::rating::repo::seaorm::SeaOrmTourRatingRepository;
use service::rating::repository::mock::MockTourRatingRepository;
use service::rating::TourRatingService;

/// Services shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub packages: Arc<TourPackageService>,
    pub tours: Arc<TourService>,
    pub ratings: Arc<TourRatingService>,
}

impl ServerState {
    /// Services backed by the given database.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let packages: Arc<dyn TourPackageRepository> = Arc::new(SeaOrmTourPackageRepository { db: db.clone() });
        let tours: Arc<dyn TourRepository> = Arc::new(SeaOrmTourRepository { db: db.clone() });
        let ratings = Arc::new(SeaOrmTourRatingRepository { db });
        Self::assemble(packages, tours, ratings)
    }

    /// Services over in-process maps; nothing survives a restart.
    pub fn in_memory() -> Self {
        let packages: Arc<dyn TourPackageRepository> = Arc::new(MockTourPackageRepository::default());
        let tours: Arc<dyn TourRepository> = Arc::new(MockTourRepository::default());
        Self::assemble(packages, tours, Arc::new(MockTourRatingRepository::default()))
    }

    fn assemble(
        packages: Arc<dyn TourPackageRepository>,
        tours: Arc<dyn TourRepository>,
        ratings: Arc<dyn service::rating::repository::TourRatingRepository>,
    ) -> Self {
        Self {
            packages: Arc::new(TourPackageService::new(packages.clone())),
            tours: Arc::new(TourService::new(packages, tours.clone())),
            ratings: Arc::new(TourRatingService::new(ratings, tours)),
        }
    }
}
