//! Native client trait for inter-module communication
//!
//! Tournament management, notification and UI modules call the bracket engine
//! through this trait. NO HTTP - direct function calls.

use super::{
    error::BracketError,
    model::{Bracket, Match, RecordedResult},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Bracket service API for inter-module communication
#[async_trait]
pub trait BracketApi: Send + Sync {
    /// Seed accepted participants and create the full match tree
    async fn generate_bracket(&self, tournament_id: Uuid) -> Result<Bracket, BracketError>;

    /// Get all matches of a tournament
    async fn get_bracket(&self, tournament_id: Uuid) -> Result<Bracket, BracketError>;

    /// Get a single match
    async fn get_match(&self, match_id: Uuid) -> Result<Match, BracketError>;

    /// Move a ready match to in-progress
    async fn start_match(&self, match_id: Uuid) -> Result<Match, BracketError>;

    /// Score a match and advance its winner
    async fn record_result(
        &self,
        match_id: Uuid,
        winner_id: Uuid,
        score1: u32,
        score2: u32,
    ) -> Result<RecordedResult, BracketError>;

    /// Winner of the final, once it is completed
    async fn champion(&self, tournament_id: Uuid) -> Result<Option<Uuid>, BracketError>;
}
