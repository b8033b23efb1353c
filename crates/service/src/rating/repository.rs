use async_trait::async_trait;

use super::domain::{NewRating, TourRating};
use crate::errors::ServiceError;

/// Repository abstraction for tour ratings.
#[async_trait]
pub trait TourRatingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<TourRating>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<TourRating>, ServiceError>;
    async fn find_by_tour(&self, tour_id: i32) -> Result<Vec<TourRating>, ServiceError>;
    async fn find_by_tour_and_customer(&self, tour_id: i32, customer_id: i32) -> Result<Option<TourRating>, ServiceError>;
    /// Conditional insert: fails with `Duplicate` when the (tour, customer) pair already has a rating.
    async fn insert(&self, rating: NewRating) -> Result<TourRating, ServiceError>;
    async fn update(&self, current: TourRating, score: i32, comment: Option<String>) -> Result<TourRating, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockTourRatingRepository {
        ratings: Mutex<BTreeMap<i32, TourRating>>, // key: id
    }

    #[async_trait]
    impl TourRatingRepository for MockTourRatingRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<TourRating>, ServiceError> {
            Ok(self.ratings.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<TourRating>, ServiceError> {
            Ok(self.ratings.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_tour(&self, tour_id: i32) -> Result<Vec<TourRating>, ServiceError> {
            let ratings = self.ratings.lock().unwrap();
            Ok(ratings.values().filter(|r| r.tour_id == tour_id).cloned().collect())
        }

        async fn find_by_tour_and_customer(&self, tour_id: i32, customer_id: i32) -> Result<Option<TourRating>, ServiceError> {
            let ratings = self.ratings.lock().unwrap();
            Ok(ratings.values().find(|r| r.tour_id == tour_id && r.customer_id == customer_id).cloned())
        }

        async fn insert(&self, rating: NewRating) -> Result<TourRating, ServiceError> {
            let mut ratings = self.ratings.lock().unwrap();
            // check and insert under one lock, mirroring the unique index
            if ratings.values().any(|r| r.tour_id == rating.tour_id && r.customer_id == rating.customer_id) {
                return Err(ServiceError::Duplicate(format!(
                    "tour {} already rated by customer {}",
                    rating.tour_id, rating.customer_id
                )));
            }
            let id = ratings.keys().next_back().map_or(1, |last| last + 1);
            let r = TourRating {
                id,
                tour_id: rating.tour_id,
                customer_id: rating.customer_id,
                score: rating.score,
                comment: rating.comment,
            };
            ratings.insert(id, r.clone());
            Ok(r)
        }

        async fn update(&self, current: TourRating, score: i32, comment: Option<String>) -> Result<TourRating, ServiceError> {
            let mut ratings = self.ratings.lock().unwrap();
            let stored = ratings.get_mut(&current.id).ok_or_else(|| ServiceError::not_found("tour rating"))?;
            stored.score = score;
            stored.comment = comment;
            Ok(stored.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.ratings.lock().unwrap().remove(&id).is_some())
        }
    }
}
