//! Route registration

use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Register all bracket REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // Bracket endpoints
        .route(
            "/tournaments/{tournament_id}/bracket",
            post(generate_bracket_handler).get(get_bracket_handler),
        )
        // Match endpoints
        .route("/matches/{match_id}", get(get_match_handler))
        .route("/matches/{match_id}/start", post(start_match_handler))
        .route("/matches/{match_id}/result", post(record_result_handler))
        .layer(Extension(service));

    Ok(router)
}

// ===== Handler wrappers that extract service from Extension =====
//
// Extractor rejections are turned into Problem Details instead of axum's
// plain-text bodies.

async fn generate_bracket_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<(StatusCode, Json<BracketDto>), Problem> {
    handlers::generate_bracket(service, path?).await
}

async fn get_bracket_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BracketDto>, Problem> {
    handlers::get_bracket(service, path?).await
}

async fn get_match_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MatchDto>, Problem> {
    handlers::get_match(service, path?).await
}

async fn start_match_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MatchDto>, Problem> {
    handlers::start_match(service, path?).await
}

async fn record_result_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Result<Path<Uuid>, PathRejection>,
    json: Result<Json<RecordResultRequest>, JsonRejection>,
) -> Result<Json<RecordResultResponse>, Problem> {
    handlers::record_result(service, path?, json?).await
}
