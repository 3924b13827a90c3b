//! Result recording and winner advancement
//!
//! Scoring a match completes it and copies the winner into the one downstream
//! match whose `source_match1`/`source_match2` references it. Nothing else about
//! the downstream match changes; starting it is a separate transition.
//!
//! All functions here are pure: they return updated copies and leave the
//! inputs untouched, so a rejected operation never leaves a partial mutation.

use crate::contract::{BracketError, Match, MatchStatus, RecordedResult, Slot};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Check the preconditions for scoring `m` with `winner_id`
pub fn validate_result(m: &Match, winner_id: Uuid) -> Result<(), BracketError> {
    if m.status == MatchStatus::Completed {
        return Err(BracketError::invalid_result(format!(
            "Match #{} is already completed",
            m.match_number
        )));
    }
    if !m.has_both_players() {
        return Err(BracketError::invalid_result(format!(
            "Match #{} does not have two assigned players yet",
            m.match_number
        )));
    }
    if !m.is_participant(winner_id) {
        return Err(BracketError::invalid_result(format!(
            "Winner {} is not a player of match #{}",
            winner_id, m.match_number
        )));
    }
    Ok(())
}

/// Return `m` scored and completed
pub fn complete_match(
    m: &Match,
    winner_id: Uuid,
    score1: u32,
    score2: u32,
    now: DateTime<Utc>,
) -> Result<Match, BracketError> {
    validate_result(m, winner_id)?;

    let mut completed = m.clone();
    completed.score1 = Some(score1);
    completed.score2 = Some(score2);
    completed.winner_id = Some(winner_id);
    completed.status = MatchStatus::Completed;
    completed.updated_at = now;
    Ok(completed)
}

/// Find the match in the next round fed by `source`. `None` means `source` is the final.
pub fn downstream_of<'a>(
    matches: &'a [Match],
    source: &Match,
) -> Result<Option<&'a Match>, BracketError> {
    let mut candidates = matches.iter().filter(|m| {
        m.tournament_id == source.tournament_id
            && m.round == source.round + 1
            && m.slot_fed_by(source.match_number).is_some()
    });

    let next = candidates.next();
    if candidates.next().is_some() {
        return Err(BracketError::invalid_state(format!(
            "Match #{} feeds more than one downstream match",
            source.match_number
        )));
    }
    Ok(next)
}

/// Copy the winner of `completed` into its slot of `next`.
///
/// An occupied slot means the winner was already advanced (or a concurrent
/// writer got there first); it is never overwritten.
pub fn advance_winner(
    next: &Match,
    completed: &Match,
    now: DateTime<Utc>,
) -> Result<(Match, Slot), BracketError> {
    let winner_id = completed.winner_id.ok_or_else(|| {
        BracketError::invalid_state(format!(
            "Match #{} has no winner to advance",
            completed.match_number
        ))
    })?;

    let slot = next.slot_fed_by(completed.match_number).ok_or_else(|| {
        BracketError::invalid_state(format!(
            "Match #{} is not fed by match #{}",
            next.match_number, completed.match_number
        ))
    })?;

    if let Some(occupant) = next.player(slot) {
        return Err(BracketError::invalid_state(format!(
            "Slot {} of match #{} is already occupied by {}",
            slot.as_str(),
            next.match_number,
            occupant
        )));
    }

    let mut advanced = next.clone();
    match slot {
        Slot::Player1 => advanced.player1_id = Some(winner_id),
        Slot::Player2 => advanced.player2_id = Some(winner_id),
    }
    advanced.updated_at = now;
    Ok((advanced, slot))
}

/// Score a match within an in-memory bracket and advance its winner.
///
/// Returns the updated rows; the caller persists them together.
pub fn record_result(
    matches: &[Match],
    match_id: Uuid,
    winner_id: Uuid,
    score1: u32,
    score2: u32,
    now: DateTime<Utc>,
) -> Result<RecordedResult, BracketError> {
    let target = matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or_else(|| BracketError::not_found("match", match_id))?;

    let next = downstream_of(matches, target)?;
    resolve_result(target, next, winner_id, score1, score2, now)
}

/// Score `current` and copy its winner into `next`, the match fed by it.
///
/// `next` is `None` only for the final. Both rows are computed before
/// anything is written, so the caller persists all or nothing.
pub fn resolve_result(
    current: &Match,
    next: Option<&Match>,
    winner_id: Uuid,
    score1: u32,
    score2: u32,
    now: DateTime<Utc>,
) -> Result<RecordedResult, BracketError> {
    let updated_match = complete_match(current, winner_id, score1, score2, now)?;
    let advanced_match = match next {
        Some(next) => Some(advance_winner(next, &updated_match, now)?.0),
        None => None,
    };

    Ok(RecordedResult {
        updated_match,
        advanced_match,
    })
}

/// `pending -> in_progress`, once both players are known
pub fn start_match(m: &Match, now: DateTime<Utc>) -> Result<Match, BracketError> {
    if m.status != MatchStatus::Pending {
        return Err(BracketError::conflict(format!(
            "Match #{} cannot be started from status {}",
            m.match_number, m.status
        )));
    }
    if !m.has_both_players() {
        return Err(BracketError::conflict(format!(
            "Match #{} cannot be started before both players are known",
            m.match_number
        )));
    }

    let mut started = m.clone();
    started.status = MatchStatus::InProgress;
    started.updated_at = now;
    Ok(started)
}
