use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::tour::Difficulty;
use serde::Deserialize;
use service::catalog::domain::Tour;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourQuery {
    pub difficulty: Option<String>,
    pub package_code: Option<String>,
}

/// All tours, optionally narrowed by difficulty and package code.
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<TourQuery>,
) -> Result<Json<Vec<Tour>>, JsonApiError> {
    let difficulty = q
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()
        .map_err(|e| JsonApiError::bad_request(e.to_string()))?;

    let mut tours = match (difficulty, q.package_code.as_deref()) {
        (Some(d), _) => state.tours.lookup_by_difficulty(d).await?,
        (None, Some(code)) => state.tours.lookup_by_package(code).await?,
        (None, None) => state.tours.lookup_all().await?,
    };
    if let (Some(_), Some(code)) = (difficulty, q.package_code.as_deref()) {
        tours.retain(|t| t.tour_package_code == code);
    }
    Ok(Json(tours))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(tour_id): Path<i32>,
) -> Result<Json<Tour>, JsonApiError> {
    Ok(Json(state.tours.lookup_by_id(tour_id).await?))
}
