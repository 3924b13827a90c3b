//! Mapper implementations for converting contract models into DTOs

use super::dto::*;
use crate::contract;

// ===== Match conversions =====

impl From<contract::MatchStatus> for MatchStatusDto {
    fn from(status: contract::MatchStatus) -> Self {
        match status {
            contract::MatchStatus::Pending => Self::Pending,
            contract::MatchStatus::InProgress => Self::InProgress,
            contract::MatchStatus::Completed => Self::Completed,
        }
    }
}

impl From<contract::Match> for MatchDto {
    fn from(m: contract::Match) -> Self {
        Self {
            id: m.id,
            tournament_id: m.tournament_id,
            round: m.round,
            match_number: m.match_number,
            player1_id: m.player1_id,
            player2_id: m.player2_id,
            source_match1: m.source_match1,
            source_match2: m.source_match2,
            winner_id: m.winner_id,
            status: m.status.into(),
            score1: m.score1,
            score2: m.score2,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<contract::RecordedResult> for RecordResultResponse {
    fn from(result: contract::RecordedResult) -> Self {
        Self {
            updated_match: result.updated_match.into(),
            advanced_match: result.advanced_match.map(Into::into),
        }
    }
}

// ===== Bracket conversions =====

impl From<contract::BracketRound> for BracketRoundDto {
    fn from(round: contract::BracketRound) -> Self {
        Self {
            round: round.round,
            label: round.label,
            matches: round.matches.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::Bracket> for BracketDto {
    fn from(bracket: contract::Bracket) -> Self {
        Self {
            tournament_id: bracket.tournament_id,
            total_matches: bracket.matches.len(),
            is_complete: bracket.is_complete(),
            champion_id: bracket.champion(),
            rounds: bracket.rounds().into_iter().map(Into::into).collect(),
        }
    }
}
