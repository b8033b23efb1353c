use axum::{routing::{delete, get, post}, Json, Router};
use common::types::Health;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::ServerState;

pub mod packages;
pub mod ratings;
pub mod tours;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // 评分路由（/tours/:tour_id/ratings 下）
    let rating_routes = Router::new()
        .route(
            "/tours/:tour_id/ratings",
            post(ratings::create)
                .get(ratings::list)
                .put(ratings::update)
                .patch(ratings::update_some),
        )
        .route("/tours/:tour_id/ratings/average", get(ratings::average))
        .route("/tours/:tour_id/ratings/batch", post(ratings::create_many))
        .route("/tours/:tour_id/ratings/:customer_id", delete(ratings::delete));

    // 线路与套餐只读查询
    let catalog_routes = Router::new()
        .route("/tours", get(tours::list))
        .route("/tours/:tour_id", get(tours::get_one))
        .route("/packages", get(packages::list))
        .route("/packages/search/findByName", get(packages::find_by_name))
        .route("/packages/:code", get(packages::get_one));

    Router::new()
        .route("/health", get(health))
        .merge(rating_routes)
        .merge(catalog_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    // 每次请求创建 span，响应时记录状态码与耗时，失败以 ERROR 记录
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
