//! Single-elimination match tree construction
//!
//! Round 1 pairs adjacent seeded slots. Every later round holds placeholder
//! matches that reference the two previous-round matches feeding them.

use super::seeding::validate_bracket_size;
use crate::contract::{BracketError, MatchStatus, NewMatch};
use uuid::Uuid;

/// Number of rounds for a bracket of `n` entrants (`n` a power of two)
pub fn round_count(n: usize) -> u32 {
    n.trailing_zeros()
}

/// Build every match of the bracket in creation order (round-major).
///
/// Pure over its inputs: the "no matches exist yet" check belongs to the caller.
pub fn build(tournament_id: Uuid, seeded_slots: &[Uuid]) -> Result<Vec<NewMatch>, BracketError> {
    validate_bracket_size(seeded_slots.len())?;

    let mut matches = Vec::with_capacity(seeded_slots.len() - 1);
    let mut match_number: u32 = 1;

    let mut previous_round: Vec<u32> = Vec::with_capacity(seeded_slots.len() / 2);
    for pair in seeded_slots.chunks_exact(2) {
        matches.push(NewMatch {
            tournament_id,
            round: 1,
            match_number,
            player1_id: Some(pair[0]),
            player2_id: Some(pair[1]),
            source_match1: None,
            source_match2: None,
            status: MatchStatus::Pending,
        });
        previous_round.push(match_number);
        match_number += 1;
    }

    for round in 2..=round_count(seeded_slots.len()) {
        let mut current_round = Vec::with_capacity(previous_round.len() / 2);
        for sources in previous_round.chunks_exact(2) {
            matches.push(NewMatch {
                tournament_id,
                round,
                match_number,
                player1_id: None,
                player2_id: None,
                source_match1: Some(sources[0]),
                source_match2: Some(sources[1]),
                status: MatchStatus::Pending,
            });
            current_round.push(match_number);
            match_number += 1;
        }
        previous_round = current_round;
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn slots(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(2), 1);
        assert_eq!(round_count(4), 2);
        assert_eq!(round_count(8), 3);
        assert_eq!(round_count(1024), 10);
        assert_eq!(round_count(4096), 12);
    }

    #[test]
    fn test_match_and_round_counts() {
        for n in [2usize, 4, 8, 16, 32, 64, 128] {
            let matches = build(Uuid::new_v4(), &slots(n)).unwrap();
            assert_eq!(matches.len(), n - 1);

            let rounds = round_count(n);
            for r in 1..=rounds {
                let in_round = matches.iter().filter(|m| m.round == r).count();
                assert_eq!(in_round, n >> r, "round {} of n={}", r, n);
            }
            assert!(matches.iter().all(|m| m.round >= 1 && m.round <= rounds));
        }
    }

    #[test]
    fn test_match_numbers_strictly_increase_round_major() {
        let matches = build(Uuid::new_v4(), &slots(16)).unwrap();
        for (i, m) in matches.iter().enumerate() {
            assert_eq!(m.match_number, i as u32 + 1);
        }
        assert!(matches.windows(2).all(|w| w[0].round <= w[1].round));
    }

    #[test]
    fn test_every_match_but_final_has_one_consumer() {
        for n in [2usize, 4, 8, 32] {
            let matches = build(Uuid::new_v4(), &slots(n)).unwrap();

            let mut consumers: HashMap<u32, usize> = HashMap::new();
            for m in &matches {
                for source in [m.source_match1, m.source_match2].into_iter().flatten() {
                    *consumers.entry(source).or_default() += 1;
                }
            }

            let unconsumed: Vec<u32> = matches
                .iter()
                .map(|m| m.match_number)
                .filter(|number| !consumers.contains_key(number))
                .collect();
            assert_eq!(unconsumed.len(), 1, "exactly one final for n={}", n);
            assert_eq!(unconsumed[0], matches.last().unwrap().match_number);
            assert!(consumers.values().all(|&count| count == 1));
        }
    }

    #[test]
    fn test_sources_point_to_previous_round() {
        let matches = build(Uuid::new_v4(), &slots(8)).unwrap();
        let round_of: HashMap<u32, u32> = matches.iter().map(|m| (m.match_number, m.round)).collect();

        for m in matches.iter().filter(|m| m.round > 1) {
            assert_eq!(round_of[&m.source_match1.unwrap()], m.round - 1);
            assert_eq!(round_of[&m.source_match2.unwrap()], m.round - 1);
            assert!(m.player1_id.is_none() && m.player2_id.is_none());
        }
    }

    #[test]
    fn test_four_player_layout() {
        let tournament_id = Uuid::new_v4();
        let seeded = slots(4);
        let matches = build(tournament_id, &seeded).unwrap();

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].player1_id, Some(seeded[0]));
        assert_eq!(matches[0].player2_id, Some(seeded[1]));
        assert_eq!(matches[1].player1_id, Some(seeded[2]));
        assert_eq!(matches[1].player2_id, Some(seeded[3]));

        let final_match = &matches[2];
        assert_eq!(final_match.round, 2);
        assert_eq!(final_match.match_number, 3);
        assert_eq!(final_match.source_match1, Some(1));
        assert_eq!(final_match.source_match2, Some(2));
        assert!(matches.iter().all(|m| m.status == MatchStatus::Pending));
        assert!(matches.iter().all(|m| m.tournament_id == tournament_id));
    }

    #[test]
    fn test_two_players_single_final() {
        let matches = build(Uuid::new_v4(), &slots(2)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].round, 1);
        assert!(matches[0].source_match1.is_none());
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        for n in [0usize, 1, 3, 6, 10] {
            let result = build(Uuid::new_v4(), &slots(n));
            assert!(matches!(result, Err(BracketError::Validation { .. })));
        }
    }
}
