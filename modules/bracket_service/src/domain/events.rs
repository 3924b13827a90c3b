//! Domain events for bracket service
//!
//! Events are observed by the notification/UI layer to refresh bracket views.
//! The engine never waits on subscribers; publication failures are logged only.

use crate::contract::model::{Match, RecordedResult, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Domain event types for brackets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BracketEvent {
    /// Bracket was generated for a tournament
    BracketGenerated(BracketGeneratedEvent),
    /// Match moved to in-progress
    MatchStarted(MatchStartedEvent),
    /// Match result was recorded
    MatchCompleted(MatchCompletedEvent),
    /// Winner was copied into the downstream match
    PlayerAdvanced(PlayerAdvancedEvent),
    /// Final was completed
    TournamentCompleted(TournamentCompletedEvent),
}

/// Event data for bracket generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketGeneratedEvent {
    pub tournament_id: Uuid,
    /// Number of seeded participants
    pub participants: usize,
    /// Total number of matches created
    pub matches: usize,
    /// Number of rounds
    pub rounds: u32,
    pub timestamp: DateTime<Utc>,
}

/// Event data for match start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStartedEvent {
    pub tournament_id: Uuid,
    pub match_id: Uuid,
    pub match_number: u32,
    pub timestamp: DateTime<Utc>,
}

/// Event data for a recorded result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCompletedEvent {
    pub tournament_id: Uuid,
    pub match_id: Uuid,
    pub match_number: u32,
    pub round: u32,
    pub winner_id: Uuid,
    pub score1: u32,
    pub score2: u32,
    pub timestamp: DateTime<Utc>,
}

/// Event data for winner advancement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAdvancedEvent {
    pub tournament_id: Uuid,
    pub participant_id: Uuid,
    /// Match number the participant won
    pub from_match_number: u32,
    pub to_match_id: Uuid,
    pub to_match_number: u32,
    /// "player1" or "player2"
    pub slot: String,
    pub timestamp: DateTime<Utc>,
}

/// Event data for tournament completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentCompletedEvent {
    pub tournament_id: Uuid,
    pub champion_id: Uuid,
    pub final_match_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a bracket event
    async fn publish(&self, event: BracketEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: BracketEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// In-process fan-out to bracket view subscribers
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<BracketEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BracketEvent> {
        self.sender.subscribe()
    }
}

#[async_trait::async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: BracketEvent) -> anyhow::Result<()> {
        // No subscribers is not an error: nobody is watching the bracket
        let _ = self.sender.send(event);
        Ok(())
    }
}

impl BracketEvent {
    pub fn tournament_id(&self) -> Uuid {
        match self {
            Self::BracketGenerated(e) => e.tournament_id,
            Self::MatchStarted(e) => e.tournament_id,
            Self::MatchCompleted(e) => e.tournament_id,
            Self::PlayerAdvanced(e) => e.tournament_id,
            Self::TournamentCompleted(e) => e.tournament_id,
        }
    }

    /// Create a new BracketGenerated event
    pub fn generated(tournament_id: Uuid, participants: usize, matches: &[Match]) -> Self {
        BracketEvent::BracketGenerated(BracketGeneratedEvent {
            tournament_id,
            participants,
            matches: matches.len(),
            rounds: matches.iter().map(|m| m.round).max().unwrap_or(0),
            timestamp: Utc::now(),
        })
    }

    /// Create a new MatchStarted event
    pub fn started(m: &Match) -> Self {
        BracketEvent::MatchStarted(MatchStartedEvent {
            tournament_id: m.tournament_id,
            match_id: m.id,
            match_number: m.match_number,
            timestamp: Utc::now(),
        })
    }

    /// Events describing a recorded result, in the order they happened
    pub fn from_result(result: &RecordedResult) -> Vec<Self> {
        let completed = &result.updated_match;
        let Some(winner_id) = completed.winner_id else {
            return Vec::new();
        };

        let mut events = vec![BracketEvent::MatchCompleted(MatchCompletedEvent {
            tournament_id: completed.tournament_id,
            match_id: completed.id,
            match_number: completed.match_number,
            round: completed.round,
            winner_id,
            score1: completed.score1.unwrap_or(0),
            score2: completed.score2.unwrap_or(0),
            timestamp: Utc::now(),
        })];

        match &result.advanced_match {
            Some(next) => {
                let slot = next
                    .slot_fed_by(completed.match_number)
                    .unwrap_or(Slot::Player1);
                events.push(BracketEvent::PlayerAdvanced(PlayerAdvancedEvent {
                    tournament_id: completed.tournament_id,
                    participant_id: winner_id,
                    from_match_number: completed.match_number,
                    to_match_id: next.id,
                    to_match_number: next.match_number,
                    slot: slot.as_str().to_string(),
                    timestamp: Utc::now(),
                }));
            }
            None => {
                events.push(BracketEvent::TournamentCompleted(TournamentCompletedEvent {
                    tournament_id: completed.tournament_id,
                    champion_id: winner_id,
                    final_match_id: completed.id,
                    timestamp: Utc::now(),
                }));
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{MatchStatus, NewMatch};

    fn completed_match(match_number: u32, winner: Uuid) -> Match {
        let new = NewMatch {
            tournament_id: Uuid::new_v4(),
            round: 1,
            match_number,
            player1_id: Some(winner),
            player2_id: Some(Uuid::new_v4()),
            source_match1: None,
            source_match2: None,
            status: MatchStatus::Pending,
        };
        let mut m = Match::from_new(Uuid::new_v4(), &new, Utc::now());
        m.status = MatchStatus::Completed;
        m.winner_id = Some(winner);
        m.score1 = Some(2);
        m.score2 = Some(1);
        m
    }

    #[test]
    fn test_events_for_advancing_result() {
        let winner = Uuid::new_v4();
        let completed = completed_match(2, winner);
        let mut next = completed.clone();
        next.id = Uuid::new_v4();
        next.round = 2;
        next.match_number = 3;
        next.source_match1 = Some(1);
        next.source_match2 = Some(2);
        next.player2_id = Some(winner);

        let events = BracketEvent::from_result(&RecordedResult {
            updated_match: completed.clone(),
            advanced_match: Some(next.clone()),
        });

        assert_eq!(events.len(), 2);
        match &events[1] {
            BracketEvent::PlayerAdvanced(e) => {
                assert_eq!(e.participant_id, winner);
                assert_eq!(e.to_match_id, next.id);
                assert_eq!(e.slot, "player2");
            }
            other => panic!("Expected PlayerAdvanced event, got {:?}", other),
        }
    }

    #[test]
    fn test_events_for_final() {
        let winner = Uuid::new_v4();
        let completed = completed_match(1, winner);
        let events = BracketEvent::from_result(&RecordedResult {
            updated_match: completed.clone(),
            advanced_match: None,
        });

        assert!(matches!(events[0], BracketEvent::MatchCompleted(_)));
        match &events[1] {
            BracketEvent::TournamentCompleted(e) => {
                assert_eq!(e.champion_id, winner);
                assert_eq!(e.tournament_id, completed.tournament_id);
            }
            other => panic!("Expected TournamentCompleted event, got {:?}", other),
        }
    }

    #[test]
    fn test_event_serialization_tag() {
        let m = completed_match(1, Uuid::new_v4());
        let json = serde_json::to_value(BracketEvent::started(&m)).unwrap();
        assert_eq!(json["event_type"], "match_started");
        assert_eq!(json["match_number"], 1);
    }

    #[tokio::test]
    async fn test_broadcast_publisher_delivers_to_subscribers() {
        let publisher = BroadcastEventPublisher::new(8);
        let mut rx = publisher.subscribe();
        let m = completed_match(1, Uuid::new_v4());

        publisher.publish(BracketEvent::started(&m)).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.tournament_id(), m.tournament_id);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let m = completed_match(1, Uuid::new_v4());
        assert!(BroadcastEventPublisher::new(1)
            .publish(BracketEvent::started(&m))
            .await
            .is_ok());
        assert!(NoOpEventPublisher.publish(BracketEvent::started(&m)).await.is_ok());
    }
}
