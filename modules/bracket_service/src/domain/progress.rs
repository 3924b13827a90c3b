//! Tournament progress: round grouping, labels, completion and champion

use crate::contract::{Bracket, BracketRound, Match, MatchStatus};
use std::collections::BTreeMap;
use uuid::Uuid;

const ROUND_LABELS: [&str; 8] = [
    "Final",
    "Semifinals",
    "Quarterfinals",
    "Round of 16",
    "Round of 32",
    "Round of 64",
    "Round of 128",
    "Round of 256",
];

/// Display label for `round` in a bracket with `total_rounds` rounds
pub fn round_label(round: u32, total_rounds: u32) -> String {
    let from_final = total_rounds.saturating_sub(round) as usize;
    match ROUND_LABELS.get(from_final) {
        Some(label) if round >= 1 && round <= total_rounds => label.to_string(),
        _ => format!("Round {}", round),
    }
}

/// Highest round present
pub fn final_round(matches: &[Match]) -> Option<u32> {
    matches.iter().map(|m| m.round).max()
}

/// Matches grouped by round ascending, each round ordered by match number
pub fn group_rounds(matches: &[Match]) -> Vec<BracketRound> {
    let mut by_round: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round).or_default().push(m.clone());
    }

    let total_rounds = final_round(matches).unwrap_or(0);
    by_round
        .into_iter()
        .map(|(round, mut matches)| {
            matches.sort_by_key(|m| m.match_number);
            BracketRound {
                round,
                label: round_label(round, total_rounds),
                matches,
            }
        })
        .collect()
}

/// True once every match of the final round is completed
pub fn is_tournament_complete(matches: &[Match]) -> bool {
    match final_round(matches) {
        Some(last) => matches
            .iter()
            .filter(|m| m.round == last)
            .all(|m| m.status == MatchStatus::Completed),
        None => false,
    }
}

/// Winner of the final, if it has been played
pub fn tournament_champion(matches: &[Match]) -> Option<Uuid> {
    let last = final_round(matches)?;
    matches
        .iter()
        .filter(|m| m.round == last)
        .min_by_key(|m| m.match_number)
        .and_then(|m| m.winner_id)
}

impl Bracket {
    pub fn rounds(&self) -> Vec<BracketRound> {
        group_rounds(&self.matches)
    }

    pub fn round_count(&self) -> u32 {
        final_round(&self.matches).unwrap_or(0)
    }

    /// The single match with no downstream consumer
    pub fn final_match(&self) -> Option<&Match> {
        let last = final_round(&self.matches)?;
        self.matches
            .iter()
            .filter(|m| m.round == last)
            .min_by_key(|m| m.match_number)
    }

    pub fn is_complete(&self) -> bool {
        is_tournament_complete(&self.matches)
    }

    pub fn champion(&self) -> Option<Uuid> {
        tournament_champion(&self.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build;
    use chrono::Utc;

    fn bracket(n: usize) -> Bracket {
        let tournament_id = Uuid::new_v4();
        let slots: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        let now = Utc::now();
        let matches = build(tournament_id, &slots)
            .unwrap()
            .iter()
            .map(|m| Match::from_new(Uuid::new_v4(), m, now))
            .collect();
        Bracket {
            tournament_id,
            matches,
        }
    }

    #[test]
    fn test_round_labels() {
        assert_eq!(round_label(1, 1), "Final");
        assert_eq!(round_label(3, 3), "Final");
        assert_eq!(round_label(2, 3), "Semifinals");
        assert_eq!(round_label(1, 3), "Quarterfinals");
        assert_eq!(round_label(1, 4), "Round of 16");
        assert_eq!(round_label(1, 8), "Round of 256");
        assert_eq!(round_label(1, 9), "Round 1");
        assert_eq!(round_label(2, 9), "Round of 256");
    }

    #[test]
    fn test_group_rounds() {
        let bracket = bracket(8);
        let rounds = bracket.rounds();
        assert_eq!(rounds.len(), 3);
        assert_eq!(
            rounds.iter().map(|r| r.matches.len()).collect::<Vec<_>>(),
            vec![4, 2, 1]
        );
        assert_eq!(
            rounds.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            vec!["Quarterfinals", "Semifinals", "Final"]
        );
        assert!(rounds[0]
            .matches
            .windows(2)
            .all(|w| w[0].match_number < w[1].match_number));
    }

    #[test]
    fn test_completion_and_champion() {
        let mut bracket = bracket(4);
        assert!(!bracket.is_complete());
        assert_eq!(bracket.champion(), None);
        assert_eq!(bracket.round_count(), 2);

        let final_id = bracket.final_match().unwrap().id;
        let winner = Uuid::new_v4();
        for m in bracket.matches.iter_mut().filter(|m| m.id == final_id) {
            m.status = MatchStatus::Completed;
            m.winner_id = Some(winner);
        }

        assert!(bracket.is_complete());
        assert_eq!(bracket.champion(), Some(winner));
    }

    #[test]
    fn test_empty_bracket() {
        assert!(!is_tournament_complete(&[]));
        assert_eq!(tournament_champion(&[]), None);
        assert!(group_rounds(&[]).is_empty());
    }
}
