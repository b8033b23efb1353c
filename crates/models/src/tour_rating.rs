use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, tour};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;
pub const MAX_COMMENT_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_rating")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tour_id: i32,
    pub customer_id: i32,
    pub score: i32,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Tour }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tour => Entity::belongs_to(tour::Entity)
                .from(Column::TourId)
                .to(tour::Column::Id)
                .into(),
        }
    }
}

impl Related<tour::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tour.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_score(score: i32) -> Result<(), errors::ModelError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(errors::ModelError::Validation(format!("score must be between {MIN_SCORE} and {MAX_SCORE}")));
    }
    Ok(())
}

pub fn validate_comment(comment: Option<&str>) -> Result<(), errors::ModelError> {
    if comment.is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN) {
        return Err(errors::ModelError::Validation(format!("comment must be at most {MAX_COMMENT_LEN} characters")));
    }
    Ok(())
}

/// Insert a rating. A second rating for the same (tour, customer) fails with `Conflict`.
pub async fn create(
    db: &DatabaseConnection,
    tour_id: i32,
    customer_id: i32,
    score: i32,
    comment: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_score(score)?;
    validate_comment(comment.as_deref())?;
    let am = ActiveModel {
        tour_id: Set(tour_id),
        customer_id: Set(customer_id),
        score: Set(score),
        comment: Set(comment),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_tour(db: &DatabaseConnection, tour_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::TourId.eq(tour_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find_by_tour_and_customer(db: &DatabaseConnection, tour_id: i32, customer_id: i32) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::TourId.eq(tour_id))
        .filter(Column::CustomerId.eq(customer_id))
        .one(db)
        .await?)
}

/// Overwrite score and comment of a stored rating.
pub async fn update_score_and_comment(db: &DatabaseConnection, found: Model, score: i32, comment: Option<String>) -> Result<Model, errors::ModelError> {
    validate_score(score)?;
    validate_comment(comment.as_deref())?;
    let mut am: ActiveModel = found.into();
    am.score = Set(score);
    am.comment = Set(comment);
    Ok(am.update(db).await?)
}
