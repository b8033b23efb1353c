use std::sync::Arc;

use models::tour_rating::{validate_comment, validate_score};
use tracing::{info, instrument, warn};

use super::domain::{NewRating, RatingPatch, TourRating};
use super::repository::TourRatingRepository;
use crate::catalog::domain::Tour;
use crate::catalog::repository::TourRepository;
use crate::errors::ServiceError;
use crate::patch::Patch;

/// Rating business service independent of web framework.
///
/// Inputs are validated before any lookup, so a bad score is reported ahead of
/// a missing tour or rating.
pub struct TourRatingService {
    ratings: Arc<dyn TourRatingRepository>,
    tours: Arc<dyn TourRepository>,
}

impl TourRatingService {
    pub fn new(ratings: Arc<dyn TourRatingRepository>, tours: Arc<dyn TourRepository>) -> Self {
        Self { ratings, tours }
    }

    /// Rate a tour on behalf of a customer.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{TourPackageService, TourService, domain::TourInput};
    /// use service::catalog::repository::{TourPackageRepository, TourRepository, mock::{MockTourPackageRepository, MockTourRepository}};
    /// use service::rating::{TourRatingService, repository::mock::MockTourRatingRepository};
    /// use models::tour::{Difficulty, Region};
    /// use std::sync::Arc;
    /// let packages: Arc<dyn TourPackageRepository> = Arc::new(MockTourPackageRepository::default());
    /// let tours: Arc<dyn TourRepository> = Arc::new(MockTourRepository::default());
    /// tokio_test::block_on(TourPackageService::new(packages.clone()).create_tour_package("NW", "Nature Watch")).unwrap();
    /// let tour = tokio_test::block_on(TourService::new(packages, tours.clone()).create_tour(TourInput {
    ///     package_name: "Nature Watch".into(), title: "Owls".into(), description: "".into(), blurb: "".into(),
    ///     price: 50, duration: "1 day".into(), bullets: "".into(), keywords: "".into(),
    ///     difficulty: Difficulty::Easy, region: Region::Varies,
    /// })).unwrap();
    /// let svc = TourRatingService::new(Arc::new(MockTourRatingRepository::default()), tours);
    /// let rating = tokio_test::block_on(svc.create(tour.id, 7, 5, Some("hoot".into()))).unwrap();
    /// assert_eq!(rating.score, 5);
    /// assert_eq!(tokio_test::block_on(svc.average_score(tour.id)).unwrap(), Some(5.0));
    /// ```
    #[instrument(skip(self, comment))]
    pub async fn create(&self, tour_id: i32, customer_id: i32, score: i32, comment: Option<String>) -> Result<TourRating, ServiceError> {
        validate_score(score)?;
        validate_comment(comment.as_deref())?;
        let tour = self.verify_tour(tour_id).await?;
        let rating = self.ratings.insert(NewRating { tour_id: tour.id, customer_id, score, comment }).await?;
        info!(rating_id = rating.id, tour_id, customer_id, "tour_rating_created");
        Ok(rating)
    }

    pub async fn lookup_rating_by_id(&self, id: i32) -> Result<Option<TourRating>, ServiceError> {
        self.ratings.find_by_id(id).await
    }

    pub async fn lookup_all(&self) -> Result<Vec<TourRating>, ServiceError> {
        self.ratings.find_all().await
    }

    /// All ratings of a tour; `NotFound` when the tour does not exist.
    #[instrument(skip(self))]
    pub async fn lookup_ratings(&self, tour_id: i32) -> Result<Vec<TourRating>, ServiceError> {
        let tour = self.verify_tour(tour_id).await?;
        self.ratings.find_by_tour(tour.id).await
    }

    /// Overwrite score and comment of an existing rating.
    #[instrument(skip(self, comment))]
    pub async fn update(&self, tour_id: i32, customer_id: i32, score: i32, comment: Option<String>) -> Result<TourRating, ServiceError> {
        validate_score(score)?;
        validate_comment(comment.as_deref())?;
        let rating = self.verify_tour_rating(tour_id, customer_id).await?;
        self.ratings.update(rating, score, comment).await
    }

    /// Overwrite only the supplied fields of an existing rating.
    ///
    /// `comment: Null` clears the comment. `score: Null` is rejected since a rating always has a score.
    #[instrument(skip(self, patch))]
    pub async fn update_some(&self, tour_id: i32, customer_id: i32, patch: RatingPatch) -> Result<TourRating, ServiceError> {
        match patch.score {
            Patch::Null => return Err(ServiceError::Validation("score cannot be null".into())),
            Patch::Value(s) => validate_score(s)?,
            Patch::Absent => {}
        }
        if let Patch::Value(c) = &patch.comment {
            validate_comment(Some(c))?;
        }
        let rating = self.verify_tour_rating(tour_id, customer_id).await?;
        let score = match patch.score {
            Patch::Value(s) => s,
            _ => rating.score,
        };
        let comment = patch.comment.apply_to(rating.comment.clone());
        self.ratings.update(rating, score, comment).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, tour_id: i32, customer_id: i32) -> Result<(), ServiceError> {
        let rating = self.verify_tour_rating(tour_id, customer_id).await?;
        if !self.ratings.delete(rating.id).await? {
            // removed by a concurrent request between lookup and delete
            return Err(ServiceError::not_found("tour rating"));
        }
        info!(rating_id = rating.id, tour_id, customer_id, "tour_rating_deleted");
        Ok(())
    }

    /// Mean score of a tour's ratings, `None` when it has none.
    #[instrument(skip(self))]
    pub async fn average_score(&self, tour_id: i32) -> Result<Option<f64>, ServiceError> {
        let tour = self.verify_tour(tour_id).await?;
        let ratings = self.ratings.find_by_tour(tour.id).await?;
        Ok(average(ratings.iter().map(|r| r.score)))
    }

    /// Give every listed customer the same score for a tour, without comments.
    ///
    /// Stops at the first customer who already rated the tour. Ratings inserted
    /// before that point stay stored; the batch is not atomic.
    #[instrument(skip(self, customer_ids), fields(customers = customer_ids.len()))]
    pub async fn rate_many(&self, tour_id: i32, score: i32, customer_ids: &[i32]) -> Result<(), ServiceError> {
        validate_score(score)?;
        let tour = self.verify_tour(tour_id).await?;
        for &customer_id in customer_ids {
            if self.ratings.find_by_tour_and_customer(tour.id, customer_id).await?.is_some() {
                warn!(tour_id, customer_id, "duplicate rating in batch");
                return Err(ServiceError::Duplicate("Unable to create duplicate ratings".into()));
            }
            self.ratings
                .insert(NewRating { tour_id: tour.id, customer_id, score, comment: None })
                .await?;
        }
        info!(tour_id, count = customer_ids.len(), "tour_ratings_batch_created");
        Ok(())
    }

    async fn verify_tour(&self, tour_id: i32) -> Result<Tour, ServiceError> {
        self.tours
            .find_by_id(tour_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tour does not exist {tour_id}")))
    }

    async fn verify_tour_rating(&self, tour_id: i32, customer_id: i32) -> Result<TourRating, ServiceError> {
        self.ratings
            .find_by_tour_and_customer(tour_id, customer_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tour-Rating pair for request: {tour_id} for customer {customer_id}")))
    }
}

fn average(scores: impl Iterator<Item = i32>) -> Option<f64> {
    let (sum, n) = scores.fold((0i64, 0u32), |(sum, n), s| (sum + i64::from(s), n + 1));
    (n > 0).then(|| sum as f64 / f64::from(n))
}
