use std::sync::Arc;

use models::tour::Difficulty;
use tracing::{debug, info, instrument};

use super::domain::{Tour, TourInput, TourPackage};
use super::repository::{TourPackageRepository, TourRepository};
use crate::errors::ServiceError;

/// Tour package operations. Packages are created once and never updated.
pub struct TourPackageService {
    repo: Arc<dyn TourPackageRepository>,
}

impl TourPackageService {
    pub fn new(repo: Arc<dyn TourPackageRepository>) -> Self { Self { repo } }

    /// Return the package stored under `code`, creating it first if absent.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{TourPackageService, repository::mock::MockTourPackageRepository};
    /// use std::sync::Arc;
    /// let svc = TourPackageService::new(Arc::new(MockTourPackageRepository::default()));
    /// let first = tokio_test::block_on(svc.create_tour_package("BC", "Backpack Cal")).unwrap();
    /// let again = tokio_test::block_on(svc.create_tour_package("BC", "Ignored")).unwrap();
    /// assert_eq!(first, again);
    /// assert_eq!(tokio_test::block_on(svc.total()).unwrap(), 1);
    /// ```
    #[instrument(skip(self))]
    pub async fn create_tour_package(&self, code: &str, name: &str) -> Result<TourPackage, ServiceError> {
        if let Some(existing) = self.repo.find_by_code(code).await? {
            debug!(code = %existing.code, "tour package exists");
            return Ok(existing);
        }
        match self.repo.insert(code, name).await {
            Ok(created) => {
                info!(code = %created.code, name = %created.name, "tour_package_created");
                Ok(created)
            }
            // lost a race against a concurrent create of the same code
            Err(ServiceError::Duplicate(_)) => self
                .repo
                .find_by_code(code)
                .await?
                .ok_or_else(|| ServiceError::not_found("tour package")),
            Err(e) => Err(e),
        }
    }

    pub async fn lookup_all(&self) -> Result<Vec<TourPackage>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn lookup_by_code(&self, code: &str) -> Result<TourPackage, ServiceError> {
        self.repo.find_by_code(code).await?.ok_or_else(|| ServiceError::not_found("tour package"))
    }

    pub async fn lookup_by_name(&self, name: &str) -> Result<TourPackage, ServiceError> {
        self.repo.find_by_name(name).await?.ok_or_else(|| ServiceError::not_found("tour package"))
    }

    pub async fn total(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }
}

/// Tour operations. Tours are created by the startup import and read-only afterwards.
pub struct TourService {
    packages: Arc<dyn TourPackageRepository>,
    tours: Arc<dyn TourRepository>,
}

impl TourService {
    pub fn new(packages: Arc<dyn TourPackageRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { packages, tours }
    }

    /// Create a tour in the package whose name is `input.package_name`.
    ///
    /// An unknown package name is an `UnknownPackage` error, not `NotFound`.
    #[instrument(skip(self, input), fields(title = %input.title, package = %input.package_name))]
    pub async fn create_tour(&self, input: TourInput) -> Result<Tour, ServiceError> {
        let package = self
            .packages
            .find_by_name(&input.package_name)
            .await?
            .ok_or_else(|| ServiceError::UnknownPackage(input.package_name.clone()))?;
        let tour = self.tours.insert(input.into_new_tour(package.code)).await?;
        debug!(tour_id = tour.id, "tour_created");
        Ok(tour)
    }

    pub async fn lookup_by_id(&self, id: i32) -> Result<Tour, ServiceError> {
        self.tours.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("tour"))
    }

    pub async fn lookup_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Tour>, ServiceError> {
        self.tours.find_by_difficulty(difficulty).await
    }

    pub async fn lookup_by_package(&self, tour_package_code: &str) -> Result<Vec<Tour>, ServiceError> {
        self.tours.find_by_package_code(tour_package_code).await
    }

    pub async fn lookup_all(&self) -> Result<Vec<Tour>, ServiceError> {
        self.tours.find_all().await
    }

    pub async fn total(&self) -> Result<u64, ServiceError> {
        self.tours.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::{MockTourPackageRepository, MockTourRepository};
    use models::tour::Region;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn services() -> (TourPackageService, TourService) {
        let packages: Arc<dyn TourPackageRepository> = Arc::new(MockTourPackageRepository::default());
        let tours: Arc<dyn TourRepository> = Arc::new(MockTourRepository::default());
        (TourPackageService::new(packages.clone()), TourService::new(packages, tours))
    }

    fn input(package_name: &str, title: &str, difficulty: Difficulty) -> TourInput {
        TourInput {
            package_name: package_name.into(),
            title: title.into(),
            description: "desc".into(),
            blurb: "blurb".into(),
            price: 120,
            duration: "1 day".into(),
            bullets: "a, b".into(),
            keywords: "k".into(),
            difficulty,
            region: Region::NorthernCalifornia,
        }
    }

    #[tokio::test]
    async fn create_tour_package_is_idempotent() {
        let (packages, _) = services();
        let a = packages.create_tour_package("CC", "California Calm").await.unwrap();
        let b = packages.create_tour_package("CC", "California Calm").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(packages.total().await.unwrap(), 1);
        assert_eq!(packages.lookup_all().await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn create_tour_package_keeps_first_name() {
        let (packages, _) = services();
        packages.create_tour_package("CC", "California Calm").await.unwrap();
        let again = packages.create_tour_package("CC", "Renamed").await.unwrap();
        assert_eq!(again.name, "California Calm");
    }

    #[tokio::test]
    async fn create_tour_resolves_package_by_name() {
        let (packages, tours) = services();
        packages.create_tour_package("KC", "Kids California").await.unwrap();
        let t = tours.create_tour(input("Kids California", "Zoo", Difficulty::Easy)).await.unwrap();
        assert_eq!(t.tour_package_code, "KC");
        assert_eq!(tours.lookup_by_id(t.id).await.unwrap(), t);
        assert_eq!(tours.total().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_tour_with_unknown_package_fails() {
        let (_, tours) = services();
        let err = tours.create_tour(input("Nowhere", "Lost", Difficulty::Easy)).await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownPackage(name) if name == "Nowhere"));
        assert_eq!(tours.total().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn lookups_filter_by_difficulty_and_package() {
        let (packages, tours) = services();
        packages.create_tour_package("KC", "Kids California").await.unwrap();
        packages.create_tour_package("SC", "Snowboard Cali").await.unwrap();
        let zoo = tours.create_tour(input("Kids California", "Zoo", Difficulty::Easy)).await.unwrap();
        let halfpipe = tours.create_tour(input("Snowboard Cali", "Halfpipe", Difficulty::Difficult)).await.unwrap();
        let bunny = tours.create_tour(input("Snowboard Cali", "Bunny Hill", Difficulty::Easy)).await.unwrap();

        assert_eq!(tours.lookup_by_difficulty(Difficulty::Easy).await.unwrap(), vec![zoo.clone(), bunny.clone()]);
        assert_eq!(tours.lookup_by_package("SC").await.unwrap(), vec![halfpipe, bunny]);
        assert!(tours.lookup_by_difficulty(Difficulty::Medium).await.unwrap().is_empty());
        assert!(matches!(tours.lookup_by_id(999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(packages.lookup_by_code("ZZ").await, Err(ServiceError::NotFound(_))));
        assert_eq!(packages.lookup_by_name("Kids California").await.unwrap().code, "KC");
    }

    /// Another writer stores the code between our lookup and our insert.
    struct LosingRaceRepository {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl TourPackageRepository for LosingRaceRepository {
        async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, ServiceError> {
            // first lookup misses, later ones see the concurrent insert
            if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok(None);
            }
            Ok(Some(TourPackage { code: code.to_string(), name: "Stored First".into() }))
        }
        async fn find_by_name(&self, _name: &str) -> Result<Option<TourPackage>, ServiceError> { Ok(None) }
        async fn insert(&self, code: &str, _name: &str) -> Result<TourPackage, ServiceError> {
            Err(ServiceError::Duplicate(format!("tour package {code}")))
        }
        async fn find_all(&self) -> Result<Vec<TourPackage>, ServiceError> { Ok(vec![]) }
        async fn count(&self) -> Result<u64, ServiceError> { Ok(1) }
    }

    #[tokio::test]
    async fn create_tour_package_after_losing_race_returns_stored_package() {
        let svc = TourPackageService::new(Arc::new(LosingRaceRepository { lookups: AtomicUsize::new(0) }));
        let pkg = svc.create_tour_package("NW", "Nature Watch").await.unwrap();
        assert_eq!(pkg, TourPackage { code: "NW".into(), name: "Stored First".into() });
    }
}
