//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Match DTOs =====

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatusDto {
    Pending,
    InProgress,
    Completed,
}

/// Match response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchDto {
    pub id: Uuid,
    pub tournament_id: Uuid,

    /// Round number, 1 = first round
    #[schema(example = 1)]
    pub round: u32,

    /// Tournament-wide sequence number
    #[schema(example = 3)]
    pub match_number: u32,

    pub player1_id: Option<Uuid>,
    pub player2_id: Option<Uuid>,

    /// Match number whose winner fills player1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_match1: Option<u32>,

    /// Match number whose winner fills player2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_match2: Option<u32>,

    pub winner_id: Option<Uuid>,
    pub status: MatchStatusDto,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record result request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordResultRequest {
    /// Must be one of the two players of the match
    pub winner_id: Uuid,
    pub score1: u32,
    pub score2: u32,
}

/// Record result response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordResultResponse {
    /// The completed match
    pub updated_match: MatchDto,

    /// Downstream match that received the winner; absent after the final
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_match: Option<MatchDto>,
}

// ===== Bracket DTOs =====

/// Matches of one round
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BracketRoundDto {
    #[schema(example = 2)]
    pub round: u32,

    #[schema(example = "Semifinals")]
    pub label: String,

    pub matches: Vec<MatchDto>,
}

/// Bracket response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BracketDto {
    pub tournament_id: Uuid,
    pub total_matches: usize,
    pub rounds: Vec<BracketRoundDto>,

    /// Every match of the final round is completed
    pub is_complete: bool,

    /// Winner of the final
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion_id: Option<Uuid>,
}
