use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use service::catalog::domain::TourPackage;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TourPackage>>, JsonApiError> {
    Ok(Json(state.packages.lookup_all().await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<TourPackage>, JsonApiError> {
    Ok(Json(state.packages.lookup_by_code(&code).await?))
}

pub async fn find_by_name(
    State(state): State<ServerState>,
    Query(q): Query<NameQuery>,
) -> Result<Json<TourPackage>, JsonApiError> {
    Ok(Json(state.packages.lookup_by_name(&q.name).await?))
}
