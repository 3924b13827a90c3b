//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::Service;
use axum::{extract::Path, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

// ===== Bracket Handlers =====

/// Generate the bracket of a tournament
pub async fn generate_bracket(
    service: Arc<Service>,
    Path(tournament_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BracketDto>), Problem> {
    let bracket = service
        .generate_bracket(tournament_id)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(bracket.into())))
}

/// Get the bracket of a tournament grouped by round
pub async fn get_bracket(
    service: Arc<Service>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<BracketDto>, Problem> {
    let bracket = service
        .get_bracket(tournament_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(bracket.into()))
}

// ===== Match Handlers =====

pub async fn get_match(
    service: Arc<Service>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchDto>, Problem> {
    let m = service.get_match(match_id).await.map_err(map_domain_error)?;
    Ok(Json(m.into()))
}

pub async fn start_match(
    service: Arc<Service>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchDto>, Problem> {
    let m = service
        .start_match(match_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(m.into()))
}

/// Record a match result and advance the winner
pub async fn record_result(
    service: Arc<Service>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<RecordResultRequest>,
) -> Result<Json<RecordResultResponse>, Problem> {
    let result = service
        .record_result(match_id, req.winner_id, req.score1, req.score2)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(result.into()))
}
