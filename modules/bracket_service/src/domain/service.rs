//! Domain service - business logic orchestration
//!
//! Wraps the pure seeding/builder/advancement functions with persistence,
//! per-tournament write serialization and event publication.

use super::events::{BracketEvent, EventPublisher};
use super::repository::{MatchRepository, ParticipantRepository, WriteOutcome};
use super::{advancement, builder, seeding};
use crate::config::Config;
use crate::contract::{Bracket, BracketError, Match, Participant, RecordedResult};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Domain service for bracket management
pub struct Service {
    participant_repo: Arc<dyn ParticipantRepository>,
    match_repo: Arc<dyn MatchRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    config: Config,
    /// One writer per tournament: generation, starts and results are serialized
    tournament_locks: LockMap,
}

type LockMap = Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>;

/// Held while writing to one tournament. Dropping the last holder removes
/// the tournament's entry from the lock map.
struct TournamentGuard {
    tournament_id: Uuid,
    locks: LockMap,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for TournamentGuard {
    fn drop(&mut self) {
        // Release the async mutex first so its Arc no longer counts
        self.guard.take();

        let mut locks = self.locks.lock();
        if locks
            .get(&self.tournament_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.tournament_id);
        }
    }
}

impl Service {
    /// Create a new service instance with default configuration
    pub fn new(
        participant_repo: Arc<dyn ParticipantRepository>,
        match_repo: Arc<dyn MatchRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self::with_config(participant_repo, match_repo, event_publisher, Config::default())
    }

    pub fn with_config(
        participant_repo: Arc<dyn ParticipantRepository>,
        match_repo: Arc<dyn MatchRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        config: Config,
    ) -> Self {
        Self {
            participant_repo,
            match_repo,
            event_publisher,
            config,
            tournament_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Bracket Operations =====

    /// Seed the accepted participants and persist the full match tree
    pub async fn generate_bracket(&self, tournament_id: Uuid) -> Result<Bracket, BracketError> {
        let _guard = self.lock_tournament(tournament_id).await;

        if self
            .match_repo
            .exists_for_tournament(tournament_id)
            .await
            .map_err(storage_error("check existing bracket"))?
        {
            return Err(already_generated(tournament_id));
        }

        let eligible: Vec<Participant> = self
            .participant_repo
            .find_by_tournament(tournament_id)
            .await
            .map_err(storage_error("load participants"))?
            .into_iter()
            .filter(Participant::is_eligible)
            .collect();

        if eligible.len() > self.config.max_participants {
            return Err(BracketError::validation(format!(
                "Bracket size {} exceeds the maximum of {}",
                eligible.len(),
                self.config.max_participants
            )));
        }

        let slots = seeding::seed(&eligible)?;
        let new_matches = builder::build(tournament_id, &slots)?;

        // Another writer may have inserted between the check and the insert
        let matches = self
            .match_repo
            .insert_bracket(&new_matches)
            .await
            .map_err(storage_error("insert bracket"))?
            .ok_or_else(|| already_generated(tournament_id))?;

        tracing::info!(
            %tournament_id,
            participants = eligible.len(),
            matches = matches.len(),
            rounds = builder::round_count(eligible.len()),
            "Bracket generated"
        );
        self.publish(BracketEvent::generated(tournament_id, eligible.len(), &matches))
            .await;

        Ok(Bracket {
            tournament_id,
            matches,
        })
    }

    /// Get all matches of a tournament
    pub async fn get_bracket(&self, tournament_id: Uuid) -> Result<Bracket, BracketError> {
        let matches = self
            .match_repo
            .find_by_tournament(tournament_id)
            .await
            .map_err(storage_error("load bracket"))?;

        if matches.is_empty() {
            return Err(BracketError::not_found("bracket", tournament_id));
        }

        Ok(Bracket {
            tournament_id,
            matches,
        })
    }

    /// Get a single match
    pub async fn get_match(&self, match_id: Uuid) -> Result<Match, BracketError> {
        self.match_repo
            .find_by_id(match_id)
            .await
            .map_err(storage_error("load match"))?
            .ok_or_else(|| BracketError::not_found("match", match_id))
    }

    /// Winner of the final, if it has been played
    pub async fn champion(&self, tournament_id: Uuid) -> Result<Option<Uuid>, BracketError> {
        Ok(self.get_bracket(tournament_id).await?.champion())
    }

    // ===== Match Operations =====

    /// Move a match with both players assigned from pending to in-progress
    pub async fn start_match(&self, match_id: Uuid) -> Result<Match, BracketError> {
        let tournament_id = self.get_match(match_id).await?.tournament_id;
        let _guard = self.lock_tournament(tournament_id).await;

        let current = self.get_match(match_id).await?;
        let started = advancement::start_match(&current, Utc::now())?;

        let outcome = self
            .match_repo
            .save_started(&started)
            .await
            .map_err(storage_error("start match"))?;
        if outcome == WriteOutcome::Stale {
            return Err(BracketError::conflict(format!(
                "Match #{} changed while it was being started",
                started.match_number
            )));
        }

        tracing::info!(
            %tournament_id,
            match_number = started.match_number,
            "Match started"
        );
        self.publish(BracketEvent::started(&started)).await;

        Ok(started)
    }

    /// Score a match and advance the winner into the downstream match.
    ///
    /// Both rows are written in one repository call, so a rejected result
    /// leaves the bracket unchanged.
    pub async fn record_result(
        &self,
        match_id: Uuid,
        winner_id: Uuid,
        score1: u32,
        score2: u32,
    ) -> Result<RecordedResult, BracketError> {
        let tournament_id = self.get_match(match_id).await?.tournament_id;
        let _guard = self.lock_tournament(tournament_id).await;

        // Re-read under the guard; another writer may have finished first
        let current = self.get_match(match_id).await?;
        advancement::validate_result(&current, winner_id)?;

        let next = self
            .match_repo
            .find_by_source(tournament_id, current.round + 1, current.match_number)
            .await
            .map_err(storage_error("find downstream match"))?;

        let result = advancement::resolve_result(
            &current,
            next.as_ref(),
            winner_id,
            score1,
            score2,
            Utc::now(),
        )
        .inspect_err(|err| {
            tracing::error!(
                %tournament_id,
                from_match = current.match_number,
                to_match = next.as_ref().map(|m| m.match_number),
                error = %err,
                "Bracket invariant violated during advancement"
            );
        })?;

        if let Some(advanced) = &result.advanced_match {
            tracing::debug!(
                %tournament_id,
                %winner_id,
                from_match = current.match_number,
                to_match = advanced.match_number,
                slot = advanced.slot_fed_by(current.match_number).map(|s| s.as_str()),
                "Advancing winner"
            );
        }

        let outcome = self
            .match_repo
            .save_result(&result)
            .await
            .map_err(storage_error("record result"))?;
        if outcome == WriteOutcome::Stale {
            let err = BracketError::invalid_state(format!(
                "Match #{} or its downstream slot changed while the result was being recorded",
                current.match_number
            ));
            tracing::error!(%tournament_id, error = %err, "Concurrent bracket write detected");
            return Err(err);
        }

        let updated_match = &result.updated_match;
        tracing::info!(
            %tournament_id,
            match_number = updated_match.match_number,
            %winner_id,
            score1,
            score2,
            is_final = result.advanced_match.is_none(),
            "Match result recorded"
        );

        for event in BracketEvent::from_result(&result) {
            self.publish(event).await;
        }

        Ok(result)
    }

    // ===== Helper Methods =====

    async fn lock_tournament(&self, tournament_id: Uuid) -> TournamentGuard {
        // Declared first so a cancelled wait still cleans up the map entry
        let mut held = TournamentGuard {
            tournament_id,
            locks: self.tournament_locks.clone(),
            guard: None,
        };

        let lock = self
            .tournament_locks
            .lock()
            .entry(tournament_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();
        held.guard = Some(lock.lock_owned().await);
        held
    }

    async fn publish(&self, event: BracketEvent) {
        if !self.config.publish_events {
            return;
        }
        if let Err(e) = self.event_publisher.publish(event).await {
            // Log error but don't fail the operation
            tracing::warn!(error = %e, "Failed to publish bracket event");
        }
    }
}

fn already_generated(tournament_id: Uuid) -> BracketError {
    BracketError::validation(format!(
        "Bracket already generated for tournament {}",
        tournament_id
    ))
}

fn storage_error(operation: &'static str) -> impl FnOnce(anyhow::Error) -> BracketError {
    move |e| {
        tracing::error!(operation, error = ?e, "Bracket storage failure");
        BracketError::Internal
    }
}
