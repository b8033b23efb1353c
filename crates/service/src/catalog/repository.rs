use async_trait::async_trait;
use models::tour::Difficulty;

use super::domain::{NewTour, Tour, TourPackage};
use crate::errors::ServiceError;

/// Repository abstraction for tour packages.
#[async_trait]
pub trait TourPackageRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<TourPackage>, ServiceError>;
    /// Fails with `Duplicate` when the code is taken.
    async fn insert(&self, code: &str, name: &str) -> Result<TourPackage, ServiceError>;
    async fn find_all(&self) -> Result<Vec<TourPackage>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Repository abstraction for tours.
#[async_trait]
pub trait TourRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tour>, ServiceError>;
    async fn insert(&self, tour: NewTour) -> Result<Tour, ServiceError>;
    async fn find_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Tour>, ServiceError>;
    async fn find_by_package_code(&self, code: &str) -> Result<Vec<Tour>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Tour>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory repositories for tests, doc examples and database-less runs
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockTourPackageRepository {
        packages: Mutex<BTreeMap<String, TourPackage>>, // key: code
    }

    #[async_trait]
    impl TourPackageRepository for MockTourPackageRepository {
        async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, ServiceError> {
            let packages = self.packages.lock().unwrap();
            Ok(packages.get(code).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<TourPackage>, ServiceError> {
            let packages = self.packages.lock().unwrap();
            Ok(packages.values().find(|p| p.name == name).cloned())
        }

        async fn insert(&self, code: &str, name: &str) -> Result<TourPackage, ServiceError> {
            models::tour_package::validate_code(code)?;
            let mut packages = self.packages.lock().unwrap();
            if packages.contains_key(code) {
                return Err(ServiceError::Duplicate(format!("tour package {code}")));
            }
            let p = TourPackage { code: code.to_string(), name: name.to_string() };
            packages.insert(code.to_string(), p.clone());
            Ok(p)
        }

        async fn find_all(&self) -> Result<Vec<TourPackage>, ServiceError> {
            let packages = self.packages.lock().unwrap();
            Ok(packages.values().cloned().collect())
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.packages.lock().unwrap().len() as u64)
        }
    }

    #[derive(Default)]
    pub struct MockTourRepository {
        tours: Mutex<BTreeMap<i32, Tour>>, // key: id
    }

    impl MockTourRepository {
        fn filtered(&self, pred: impl Fn(&Tour) -> bool) -> Vec<Tour> {
            let tours = self.tours.lock().unwrap();
            tours.values().filter(|t| pred(t)).cloned().collect()
        }
    }

    #[async_trait]
    impl TourRepository for MockTourRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Tour>, ServiceError> {
            Ok(self.tours.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, tour: NewTour) -> Result<Tour, ServiceError> {
            let mut tours = self.tours.lock().unwrap();
            let id = tours.keys().next_back().map_or(1, |last| last + 1);
            let t = Tour {
                id,
                title: tour.title,
                description: tour.description,
                blurb: tour.blurb,
                price: tour.price,
                duration: tour.duration,
                bullets: tour.bullets,
                keywords: tour.keywords,
                tour_package_code: tour.tour_package_code,
                difficulty: tour.difficulty,
                region: tour.region,
            };
            tours.insert(id, t.clone());
            Ok(t)
        }

        async fn find_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Tour>, ServiceError> {
            Ok(self.filtered(|t| t.difficulty == difficulty))
        }

        async fn find_by_package_code(&self, code: &str) -> Result<Vec<Tour>, ServiceError> {
            Ok(self.filtered(|t| t.tour_package_code == code))
        }

        async fn find_all(&self) -> Result<Vec<Tour>, ServiceError> {
            Ok(self.filtered(|_| true))
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.tours.lock().unwrap().len() as u64)
        }
    }
}
