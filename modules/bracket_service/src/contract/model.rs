//! Contract models for bracket service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - REST DTOs and storage entities carry their own representations.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// An entrant that may be placed into a bracket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Participant ID
    pub id: Uuid,
    /// Owning tournament
    pub tournament_id: Uuid,
    /// Name shown on bracket views
    pub display_name: String,
    /// Registration workflow state
    pub status: ParticipantStatus,
    /// Registration timestamp; earlier registration means a better seed
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    /// Only accepted participants are placed into a bracket
    pub fn is_eligible(&self) -> bool {
        self.status == ParticipantStatus::Accepted
    }
}

/// Participant registration state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticipantStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(format!("unknown participant status '{}'", other)),
        }
    }
}

/// Match lifecycle state. Transitions only move forward:
/// `Pending -> InProgress -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown match status '{}'", other)),
        }
    }
}

/// Player slot of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Player1,
    Player2,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player1 => "player1",
            Self::Player2 => "player2",
        }
    }
}

/// A match produced by the bracket builder, before persistence assigns an ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub tournament_id: Uuid,
    /// 1 = first round, increasing toward the final
    pub round: u32,
    /// Tournament-wide sequence number, round-major then left-to-right
    pub match_number: u32,
    pub player1_id: Option<Uuid>,
    pub player2_id: Option<Uuid>,
    /// Match number whose winner fills `player1_id` (rounds >= 2)
    pub source_match1: Option<u32>,
    /// Match number whose winner fills `player2_id` (rounds >= 2)
    pub source_match2: Option<u32>,
    pub status: MatchStatus,
}

/// A persisted bracket match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Match ID, assigned by the persistence layer
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub round: u32,
    pub match_number: u32,
    pub player1_id: Option<Uuid>,
    pub player2_id: Option<Uuid>,
    pub source_match1: Option<u32>,
    pub source_match2: Option<u32>,
    /// Set exactly once, when the match is scored
    pub winner_id: Option<Uuid>,
    pub status: MatchStatus,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Materialize a builder match with a persistence-assigned ID
    pub fn from_new(id: Uuid, new: &NewMatch, now: DateTime<Utc>) -> Self {
        Self {
            id,
            tournament_id: new.tournament_id,
            round: new.round,
            match_number: new.match_number,
            player1_id: new.player1_id,
            player2_id: new.player2_id,
            source_match1: new.source_match1,
            source_match2: new.source_match2,
            winner_id: None,
            status: new.status,
            score1: None,
            score2: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_both_players(&self) -> bool {
        self.player1_id.is_some() && self.player2_id.is_some()
    }

    pub fn is_participant(&self, participant_id: Uuid) -> bool {
        self.player1_id == Some(participant_id) || self.player2_id == Some(participant_id)
    }

    /// Slot of this match fed by the winner of `match_number`, if any
    pub fn slot_fed_by(&self, match_number: u32) -> Option<Slot> {
        if self.source_match1 == Some(match_number) {
            Some(Slot::Player1)
        } else if self.source_match2 == Some(match_number) {
            Some(Slot::Player2)
        } else {
            None
        }
    }

    pub fn player(&self, slot: Slot) -> Option<Uuid> {
        match slot {
            Slot::Player1 => self.player1_id,
            Slot::Player2 => self.player2_id,
        }
    }
}

/// Outcome of recording a match result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResult {
    /// The scored match, now completed
    pub updated_match: Match,
    /// The downstream match that received the winner; `None` after the final
    pub advanced_match: Option<Match>,
}

/// All matches of one tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracket {
    pub tournament_id: Uuid,
    /// Matches ordered by match number
    pub matches: Vec<Match>,
}

/// Matches of one round, with a display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketRound {
    pub round: u32,
    /// "Final", "Semifinals", ... counted back from the last round
    pub label: String,
    pub matches: Vec<Match>,
}
