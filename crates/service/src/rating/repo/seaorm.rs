use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use models::tour_rating;

use crate::errors::ServiceError;
use crate::rating::domain::{NewRating, TourRating};
use crate::rating::repository::TourRatingRepository;

/// SeaORM-backed repository; uniqueness comes from `uniq_tour_rating_tour_customer`.
pub struct SeaOrmTourRatingRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TourRatingRepository for SeaOrmTourRatingRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<TourRating>, ServiceError> {
        Ok(tour_rating::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<TourRating>, ServiceError> {
        Ok(tour_rating::Entity::find()
            .order_by_asc(tour_rating::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_tour(&self, tour_id: i32) -> Result<Vec<TourRating>, ServiceError> {
        Ok(tour_rating::find_by_tour(&self.db, tour_id).await?)
    }

    async fn find_by_tour_and_customer(&self, tour_id: i32, customer_id: i32) -> Result<Option<TourRating>, ServiceError> {
        Ok(tour_rating::find_by_tour_and_customer(&self.db, tour_id, customer_id).await?)
    }

    async fn insert(&self, r: NewRating) -> Result<TourRating, ServiceError> {
        tour_rating::create(&self.db, r.tour_id, r.customer_id, r.score, r.comment)
            .await
            .map_err(|e| match ServiceError::from(e) {
                ServiceError::Duplicate(_) => ServiceError::Duplicate(format!(
                    "tour {} already rated by customer {}",
                    r.tour_id, r.customer_id
                )),
                other => other,
            })
    }

    async fn update(&self, current: TourRating, score: i32, comment: Option<String>) -> Result<TourRating, ServiceError> {
        Ok(tour_rating::update_score_and_comment(&self.db, current, score, comment).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = tour_rating::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
