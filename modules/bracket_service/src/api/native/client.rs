//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{Bracket, BracketApi, BracketError, Match, RecordedResult};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client that directly calls the domain service
///
/// Used by other modules running in the same process, without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BracketApi for NativeClient {
    async fn generate_bracket(&self, tournament_id: Uuid) -> Result<Bracket, BracketError> {
        self.service.generate_bracket(tournament_id).await
    }

    async fn get_bracket(&self, tournament_id: Uuid) -> Result<Bracket, BracketError> {
        self.service.get_bracket(tournament_id).await
    }

    async fn get_match(&self, match_id: Uuid) -> Result<Match, BracketError> {
        self.service.get_match(match_id).await
    }

    async fn start_match(&self, match_id: Uuid) -> Result<Match, BracketError> {
        self.service.start_match(match_id).await
    }

    async fn record_result(
        &self,
        match_id: Uuid,
        winner_id: Uuid,
        score1: u32,
        score2: u32,
    ) -> Result<RecordedResult, BracketError> {
        self.service
            .record_result(match_id, winner_id, score1, score2)
            .await
    }

    async fn champion(&self, tournament_id: Uuid) -> Result<Option<Uuid>, BracketError> {
        self.service.champion(tournament_id).await
    }
}
