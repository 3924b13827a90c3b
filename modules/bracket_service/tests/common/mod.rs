//! Common test utilities: in-memory repositories, event recorders, fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use bracket_service::config::Config;
use bracket_service::contract::*;
use bracket_service::domain::repository::{MatchRepository, ParticipantRepository, WriteOutcome};
use bracket_service::domain::{BracketEvent, EventPublisher, Service};
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

// ===== Fixtures =====

fn registration_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

/// Accepted participant registered `minutes` after registration opened
pub fn participant(tournament_id: Uuid, name: &str, minutes: i64) -> Participant {
    Participant {
        id: Uuid::new_v4(),
        tournament_id,
        display_name: name.to_string(),
        status: ParticipantStatus::Accepted,
        registered_at: registration_start() + Duration::minutes(minutes),
    }
}

/// `n` accepted participants; the participant at index i is seed i + 1
pub fn seeded_field(tournament_id: Uuid, n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| participant(tournament_id, &format!("P{}", i + 1), i as i64))
        .collect()
}

pub fn with_status(mut p: Participant, status: ParticipantStatus) -> Participant {
    p.status = status;
    p
}

pub fn match_by_number(bracket: &Bracket, number: u32) -> Match {
    bracket
        .matches
        .iter()
        .find(|m| m.match_number == number)
        .cloned()
        .unwrap_or_else(|| panic!("match #{} not in bracket", number))
}

// ===== Mock repositories =====

#[derive(Clone, Default)]
pub struct MockParticipantRepo {
    data: Arc<RwLock<Vec<Participant>>>,
}

impl MockParticipantRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_all(&self, participants: &[Participant]) {
        self.data.write().extend_from_slice(participants);
    }
}

#[async_trait]
impl ParticipantRepository for MockParticipantRepo {
    async fn find_by_tournament(&self, tournament_id: Uuid) -> anyhow::Result<Vec<Participant>> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect())
    }
}

type Interleaved = Box<dyn FnOnce(&mut HashMap<Uuid, Match>) + Send>;

#[derive(Clone, Default)]
pub struct MockMatchRepo {
    data: Arc<RwLock<HashMap<Uuid, Match>>>,
    fail_updates: Arc<AtomicBool>,
    hide_existing: Arc<AtomicBool>,
    interleaved: Arc<Mutex<Option<Interleaved>>>,
}

impl MockMatchRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn snapshot(&self, match_id: Uuid) -> Option<Match> {
        self.data.read().get(&match_id).cloned()
    }

    /// Overwrite a stored match, bypassing the engine
    pub fn tamper(&self, match_id: Uuid, f: impl FnOnce(&mut Match)) {
        if let Some(m) = self.data.write().get_mut(&match_id) {
            f(m);
        }
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Make `exists_for_tournament` always answer false, like a replica
    /// that checked before another one inserted
    pub fn set_hide_existing(&self, hide: bool) {
        self.hide_existing.store(hide, Ordering::SeqCst);
    }

    /// Run `f` against storage right before the next guarded write, as
    /// another writer would
    pub fn interleave_before_save(
        &self,
        f: impl FnOnce(&mut HashMap<Uuid, Match>) + Send + 'static,
    ) {
        *self.interleaved.lock() = Some(Box::new(f));
    }

    fn run_interleaved(&self, data: &mut HashMap<Uuid, Match>) {
        if let Some(f) = self.interleaved.lock().take() {
            f(data);
        }
    }

    pub fn print_state(&self, context: &str) {
        let data = self.data.read();
        let mut matches: Vec<&Match> = data.values().collect();
        matches.sort_by_key(|m| m.match_number);

        println!("\n========== MatchRepository State: {} ==========", context);
        for m in matches {
            println!(
                "  #{} r{} {:?} vs {:?} -> {:?} [{}]",
                m.match_number,
                m.round,
                m.player1_id,
                m.player2_id,
                m.winner_id,
                m.status
            );
        }
        println!("================================================\n");
    }
}

#[async_trait]
impl MatchRepository for MockMatchRepo {
    async fn exists_for_tournament(&self, tournament_id: Uuid) -> anyhow::Result<bool> {
        if self.hide_existing.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self
            .data
            .read()
            .values()
            .any(|m| m.tournament_id == tournament_id))
    }

    async fn insert_bracket(&self, matches: &[NewMatch]) -> anyhow::Result<Option<Vec<Match>>> {
        let mut data = self.data.write();
        if let Some(first) = matches.first() {
            if data.values().any(|m| m.tournament_id == first.tournament_id) {
                return Ok(None);
            }
        }

        let now = Utc::now();
        let created: Vec<Match> = matches
            .iter()
            .map(|m| Match::from_new(Uuid::new_v4(), m, now))
            .collect();
        for m in &created {
            data.insert(m.id, m.clone());
        }
        Ok(Some(created))
    }

    async fn find_by_id(&self, match_id: Uuid) -> anyhow::Result<Option<Match>> {
        Ok(self.data.read().get(&match_id).cloned())
    }

    async fn find_by_tournament(&self, tournament_id: Uuid) -> anyhow::Result<Vec<Match>> {
        let mut matches: Vec<Match> = self
            .data
            .read()
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.match_number);
        Ok(matches)
    }

    async fn find_by_source(
        &self,
        tournament_id: Uuid,
        round: u32,
        source_match_number: u32,
    ) -> anyhow::Result<Option<Match>> {
        let data = self.data.read();
        let found: Vec<&Match> = data
            .values()
            .filter(|m| {
                m.tournament_id == tournament_id
                    && m.round == round
                    && m.slot_fed_by(source_match_number).is_some()
            })
            .collect();
        if found.len() > 1 {
            anyhow::bail!("match #{} feeds {} matches", source_match_number, found.len());
        }
        Ok(found.first().map(|m| (*m).clone()))
    }

    async fn save_started(&self, started: &Match) -> anyhow::Result<WriteOutcome> {
        if self.fail_updates.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable");
        }

        let mut data = self.data.write();
        self.run_interleaved(&mut data);
        let Some(stored) = data.get_mut(&started.id) else {
            return Ok(WriteOutcome::Stale);
        };
        if stored.status != MatchStatus::Pending || !stored.has_both_players() {
            return Ok(WriteOutcome::Stale);
        }
        stored.status = started.status;
        stored.updated_at = started.updated_at;
        Ok(WriteOutcome::Applied)
    }

    async fn save_result(&self, result: &RecordedResult) -> anyhow::Result<WriteOutcome> {
        if self.fail_updates.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable");
        }

        let mut data = self.data.write();
        self.run_interleaved(&mut data);
        let completed = &result.updated_match;

        // Stage on copies, commit both or neither
        let Some(mut source) = data.get(&completed.id).cloned() else {
            return Ok(WriteOutcome::Stale);
        };
        if source.status == MatchStatus::Completed {
            return Ok(WriteOutcome::Stale);
        }
        source.winner_id = completed.winner_id;
        source.score1 = completed.score1;
        source.score2 = completed.score2;
        source.status = completed.status;
        source.updated_at = completed.updated_at;

        let mut writes = vec![source];
        if let Some(advanced) = &result.advanced_match {
            let Some(mut next) = data.get(&advanced.id).cloned() else {
                return Ok(WriteOutcome::Stale);
            };
            let slot = next
                .slot_fed_by(completed.match_number)
                .ok_or_else(|| anyhow::anyhow!("match #{} is not fed", next.match_number))?;
            if next.player(slot).is_some() {
                return Ok(WriteOutcome::Stale);
            }
            match slot {
                Slot::Player1 => next.player1_id = advanced.player1_id,
                Slot::Player2 => next.player2_id = advanced.player2_id,
            }
            next.updated_at = advanced.updated_at;
            writes.push(next);
        }

        for m in writes {
            data.insert(m.id, m);
        }
        Ok(WriteOutcome::Applied)
    }
}

// ===== Event publishers =====

#[derive(Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<BracketEvent>>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BracketEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: BracketEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

pub struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: BracketEvent) -> anyhow::Result<()> {
        anyhow::bail!("event bus down")
    }
}

// ===== Harness =====

pub struct TestContext {
    pub tournament_id: Uuid,
    pub participants: MockParticipantRepo,
    pub matches: MockMatchRepo,
    pub events: RecordingEventPublisher,
    pub service: Arc<Service>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let participants = MockParticipantRepo::new();
        let matches = MockMatchRepo::new();
        let events = RecordingEventPublisher::new();
        let service = Arc::new(Service::with_config(
            Arc::new(participants.clone()),
            Arc::new(matches.clone()),
            Arc::new(events.clone()),
            config,
        ));

        Self {
            tournament_id: Uuid::new_v4(),
            participants,
            matches,
            events,
            service,
        }
    }

    /// Register `n` accepted participants for the context's tournament
    pub fn register(&self, n: usize) -> Vec<Participant> {
        let field = seeded_field(self.tournament_id, n);
        self.participants.add_all(&field);
        field
    }
}
