use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::patch::Patch;
use service::rating::domain::{RatingPatch, TourRating};
use tracing::info;

use crate::errors::{AppJson, JsonApiError};
use crate::state::ServerState;

/// Rating as exchanged over HTTP; the tour comes from the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    pub score: i32,
    pub comment: Option<String>,
    pub customer_id: i32,
}

impl From<TourRating> for RatingDto {
    fn from(r: TourRating) -> Self {
        Self { score: r.score, comment: r.comment, customer_id: r.customer_id }
    }
}

/// PATCH body: a missing key leaves the field alone, `null` clears it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPatchInput {
    #[serde(default)]
    pub score: Patch<i32>,
    #[serde(default)]
    pub comment: Patch<String>,
    pub customer_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    pub score: i32,
}

#[derive(Debug, Serialize)]
pub struct AverageDto {
    pub average: Option<f64>,
}

pub async fn create(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
    AppJson(input): AppJson<RatingDto>,
) -> Result<(StatusCode, Json<RatingDto>), JsonApiError> {
    info!("POST /tours/{}/ratings", tour_id);
    let rating = state.ratings.create(tour_id, input.customer_id, input.score, input.comment).await?;
    Ok((StatusCode::CREATED, Json(rating.into())))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
) -> Result<Json<Vec<RatingDto>>, JsonApiError> {
    info!("GET /tours/{}/ratings", tour_id);
    let ratings = state.ratings.lookup_ratings(tour_id).await?;
    Ok(Json(ratings.into_iter().map(RatingDto::from).collect()))
}

pub async fn average(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
) -> Result<Json<AverageDto>, JsonApiError> {
    info!("GET /tours/{}/ratings/average", tour_id);
    let average = state.ratings.average_score(tour_id).await?;
    Ok(Json(AverageDto { average }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
    AppJson(input): AppJson<RatingDto>,
) -> Result<Json<RatingDto>, JsonApiError> {
    info!("PUT /tours/{}/ratings", tour_id);
    let rating = state.ratings.update(tour_id, input.customer_id, input.score, input.comment).await?;
    Ok(Json(rating.into()))
}

pub async fn update_some(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
    AppJson(input): AppJson<RatingPatchInput>,
) -> Result<Json<RatingDto>, JsonApiError> {
    info!("PATCH /tours/{}/ratings", tour_id);
    let patch = RatingPatch { score: input.score, comment: input.comment };
    let rating = state.ratings.update_some(tour_id, input.customer_id, patch).await?;
    Ok(Json(rating.into()))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((tour_id, customer_id)): Path<(i32, i32)>,
) -> Result<StatusCode, JsonApiError> {
    info!("DELETE /tours/{}/ratings/{}", tour_id, customer_id);
    state.ratings.delete(tour_id, customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_many(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
    Query(q): Query<BatchQuery>,
    AppJson(customers): AppJson<Vec<i32>>,
) -> Result<StatusCode, JsonApiError> {
    info!("POST /tours/{}/ratings/batch", tour_id);
    state.ratings.rate_many(tour_id, q.score, &customers).await?;
    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_dto_uses_camel_case() {
        let dto: RatingDto = serde_json::from_str(r#"{"score": 4, "comment": "ok", "customerId": 7}"#).unwrap();
        assert_eq!(dto, RatingDto { score: 4, comment: Some("ok".into()), customer_id: 7 });
        let json = serde_json::to_value(RatingDto { score: 2, comment: None, customer_id: 1 }).unwrap();
        assert_eq!(json, serde_json::json!({"score": 2, "comment": null, "customerId": 1}));
    }

    #[test]
    fn patch_input_tells_missing_from_null() {
        let only_score: RatingPatchInput = serde_json::from_str(r#"{"score": 3, "customerId": 1}"#).unwrap();
        assert_eq!(only_score.score, Patch::Value(3));
        assert_eq!(only_score.comment, Patch::Absent);
        let cleared: RatingPatchInput = serde_json::from_str(r#"{"comment": null, "customerId": 1}"#).unwrap();
        assert_eq!(cleared.score, Patch::Absent);
        assert_eq!(cleared.comment, Patch::Null);
    }
}
