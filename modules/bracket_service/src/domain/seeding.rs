//! Standard tournament seeding
//!
//! Participants are ranked by registration time (earliest registrant is seed 1)
//! and spread over bracket slots so that the top seeds can only meet late:
//! seeds 1 and 2 only in the final, seeds 1-4 only from the semifinals on, etc.
//! Registration order is the only ranking signal available; it is not a skill rating.

use crate::contract::{BracketError, Participant};
use std::collections::HashSet;
use uuid::Uuid;

/// Smallest bracket that can be generated
pub const MIN_BRACKET_SIZE: usize = 2;

/// Check that `n` entrants form a complete single-elimination bracket
pub fn validate_bracket_size(n: usize) -> Result<(), BracketError> {
    if n < MIN_BRACKET_SIZE {
        return Err(BracketError::validation(format!(
            "Need at least {} eligible participants, got {}",
            MIN_BRACKET_SIZE, n
        )));
    }
    if !n.is_power_of_two() {
        return Err(BracketError::validation(format!(
            "Number of eligible participants must be a power of two (2, 4, 8, 16, ...), got {}",
            n
        )));
    }
    Ok(())
}

/// Seed index held by each bracket slot.
///
/// `positions(1) = [0]`, `positions(2n) = interleave(positions(n), 2n-1-positions(n))`.
/// For 8 slots this yields `[0, 7, 3, 4, 1, 6, 2, 5]`: 1v8, 4v5, 2v7, 3v6.
/// `n` must be a power of two.
pub fn slot_positions(n: usize) -> Vec<usize> {
    let mut positions = vec![0];
    while positions.len() < n {
        let size = positions.len() * 2;
        positions = positions
            .iter()
            .flat_map(|&seed| [seed, size - 1 - seed])
            .collect();
    }
    positions
}

/// Order eligible participants into bracket slots `0..N`.
///
/// The caller filters to eligible participants first; anything else is rejected.
pub fn seed(participants: &[Participant]) -> Result<Vec<Uuid>, BracketError> {
    validate_bracket_size(participants.len())?;

    if let Some(ineligible) = participants.iter().find(|p| !p.is_eligible()) {
        return Err(BracketError::validation(format!(
            "Participant {} is not accepted (status: {})",
            ineligible.id,
            ineligible.status.as_str()
        )));
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.id) {
            return Err(BracketError::validation(format!(
                "Participant {} appears more than once",
                participant.id
            )));
        }
    }

    // Stable ranking: registration time, then ID for identical timestamps
    let mut ranked: Vec<&Participant> = participants.iter().collect();
    ranked.sort_by(|a, b| {
        a.registered_at
            .cmp(&b.registered_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(slot_positions(ranked.len())
        .into_iter()
        .map(|seed| ranked[seed].id)
        .collect())
}
