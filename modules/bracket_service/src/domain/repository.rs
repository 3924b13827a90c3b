//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{Match, NewMatch, Participant, RecordedResult};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to registered participants
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// All participants of a tournament, in any registration state
    async fn find_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<Participant>>;
}

/// Read/write access to bracket matches
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Check whether any match exists for the tournament
    async fn exists_for_tournament(&self, tournament_id: Uuid) -> Result<bool>;

    /// Insert a whole bracket at once, assigning IDs.
    ///
    /// Returns `None` without writing when the tournament already has matches.
    async fn insert_bracket(&self, matches: &[NewMatch]) -> Result<Option<Vec<Match>>>;

    /// Find a match by ID
    async fn find_by_id(&self, match_id: Uuid) -> Result<Option<Match>>;

    /// All matches of a tournament, ordered by match number
    async fn find_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<Match>>;

    /// The match in `round` whose source_match1 or source_match2 is `source_match_number`
    async fn find_by_source(
        &self,
        tournament_id: Uuid,
        round: u32,
        source_match_number: u32,
    ) -> Result<Option<Match>>;

    /// Persist a `pending -> in_progress` transition.
    ///
    /// Only the status columns are written, and only while the stored row is
    /// still pending.
    async fn save_started(&self, started: &Match) -> Result<WriteOutcome>;

    /// Persist a scored match and, unless it was the final, the winner's new
    /// slot in the downstream match. All or nothing.
    ///
    /// The source row is written only while it is not completed; the fed
    /// slot only while it is still empty. Other columns of the downstream
    /// row are left alone.
    async fn save_result(&self, result: &RecordedResult) -> Result<WriteOutcome>;
}

/// Outcome of a conditional write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// A guard failed: the stored rows changed after they were read
    Stale,
}
