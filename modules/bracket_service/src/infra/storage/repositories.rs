//! SeaORM repository implementations

use crate::contract::{Match, MatchStatus, NewMatch, Participant, RecordedResult, Slot};
use crate::domain::repository::{MatchRepository, ParticipantRepository, WriteOutcome};
use anyhow::{bail, Result};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

// ===== Participant Repository =====

pub struct SeaOrmParticipantRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmParticipantRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Register a participant. Registration workflows live outside the engine;
    /// this exists for imports and fixtures.
    pub async fn insert(&self, participant: &Participant) -> Result<()> {
        let active: entity::participant::ActiveModel = participant.into();
        entity::participant::Entity::insert(active)
            .exec_without_returning(&*self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ParticipantRepository for SeaOrmParticipantRepository {
    async fn find_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<Participant>> {
        let results = entity::participant::Entity::find()
            .filter(entity::participant::Column::TournamentId.eq(tournament_id))
            .order_by_asc(entity::participant::Column::RegisteredAt)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(|e| e.try_into())
            .collect::<Result<Vec<_>>>()
    }
}

// ===== Match Repository =====

pub struct SeaOrmMatchRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMatchRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for SeaOrmMatchRepository {
    async fn exists_for_tournament(&self, tournament_id: Uuid) -> Result<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::TournamentId.eq(tournament_id))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn insert_bracket(&self, matches: &[NewMatch]) -> Result<Option<Vec<Match>>> {
        let Some(first) = matches.first() else {
            return Ok(Some(Vec::new()));
        };
        if matches.iter().any(|m| m.tournament_id != first.tournament_id) {
            bail!("bracket insert spans more than one tournament");
        }

        let txn = self.db.begin().await?;

        let existing = entity::Entity::find()
            .filter(entity::Column::TournamentId.eq(first.tournament_id))
            .count(&txn)
            .await?;
        if existing > 0 {
            return Ok(None);
        }

        let now = chrono::Utc::now();
        let created: Vec<Match> = matches
            .iter()
            .map(|m| Match::from_new(Uuid::new_v4(), m, now))
            .collect();

        let inserted = entity::Entity::insert_many(created.iter().map(entity::ActiveModel::from))
            .exec_without_returning(&txn)
            .await;
        match inserted {
            Ok(_) => {}
            // A concurrent writer won the (tournament_id, match_number) index
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        txn.commit().await?;
        Ok(Some(created))
    }

    async fn find_by_id(&self, match_id: Uuid) -> Result<Option<Match>> {
        let result = entity::Entity::find_by_id(match_id).one(&*self.db).await?;

        match result {
            Some(entity) => Ok(Some(entity.try_into()?)),
            None => Ok(None),
        }
    }

    async fn find_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<Match>> {
        let results = entity::Entity::find()
            .filter(entity::Column::TournamentId.eq(tournament_id))
            .order_by_asc(entity::Column::MatchNumber)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(|e| e.try_into())
            .collect::<Result<Vec<_>>>()
    }

    async fn find_by_source(
        &self,
        tournament_id: Uuid,
        round: u32,
        source_match_number: u32,
    ) -> Result<Option<Match>> {
        let source = source_match_number as i32;
        let results = entity::Entity::find()
            .filter(entity::Column::TournamentId.eq(tournament_id))
            .filter(entity::Column::Round.eq(round as i32))
            .filter(
                Condition::any()
                    .add(entity::Column::SourceMatch1.eq(source))
                    .add(entity::Column::SourceMatch2.eq(source)),
            )
            .all(&*self.db)
            .await?;

        if results.len() > 1 {
            bail!(
                "match #{} of tournament {} feeds {} downstream matches",
                source_match_number,
                tournament_id,
                results.len()
            );
        }

        match results.into_iter().next() {
            Some(entity) => Ok(Some(entity.try_into()?)),
            None => Ok(None),
        }
    }

    async fn save_started(&self, started: &Match) -> Result<WriteOutcome> {
        let updated = entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(started.status.as_str()))
            .col_expr(entity::Column::UpdatedAt, Expr::value(started.updated_at))
            .filter(entity::Column::Id.eq(started.id))
            .filter(entity::Column::Status.eq(MatchStatus::Pending.as_str()))
            .filter(entity::Column::Player1Id.is_not_null())
            .filter(entity::Column::Player2Id.is_not_null())
            .exec(&*self.db)
            .await?;

        Ok(outcome(updated.rows_affected))
    }

    async fn save_result(&self, result: &RecordedResult) -> Result<WriteOutcome> {
        let completed = &result.updated_match;
        let txn = self.db.begin().await?;

        // Returning before commit rolls the transaction back
        let scored = entity::Entity::update_many()
            .col_expr(entity::Column::WinnerId, Expr::value(completed.winner_id))
            .col_expr(entity::Column::Score1, Expr::value(completed.score1.map(i64::from)))
            .col_expr(entity::Column::Score2, Expr::value(completed.score2.map(i64::from)))
            .col_expr(entity::Column::Status, Expr::value(completed.status.as_str()))
            .col_expr(entity::Column::UpdatedAt, Expr::value(completed.updated_at))
            .filter(entity::Column::Id.eq(completed.id))
            .filter(entity::Column::Status.ne(MatchStatus::Completed.as_str()))
            .exec(&txn)
            .await?;
        if outcome(scored.rows_affected) == WriteOutcome::Stale {
            return Ok(WriteOutcome::Stale);
        }

        if let Some(advanced) = &result.advanced_match {
            let (column, player) = match advanced.slot_fed_by(completed.match_number) {
                Some(Slot::Player1) => (entity::Column::Player1Id, advanced.player1_id),
                Some(Slot::Player2) => (entity::Column::Player2Id, advanced.player2_id),
                None => bail!(
                    "match #{} is not fed by match #{}",
                    advanced.match_number,
                    completed.match_number
                ),
            };

            let filled = entity::Entity::update_many()
                .col_expr(column, Expr::value(player))
                .col_expr(entity::Column::UpdatedAt, Expr::value(advanced.updated_at))
                .filter(entity::Column::Id.eq(advanced.id))
                .filter(column.is_null())
                .exec(&txn)
                .await?;
            if outcome(filled.rows_affected) == WriteOutcome::Stale {
                return Ok(WriteOutcome::Stale);
            }
        }

        txn.commit().await?;
        Ok(WriteOutcome::Applied)
    }
}

fn outcome(rows_affected: u64) -> WriteOutcome {
    if rows_affected == 1 {
        WriteOutcome::Applied
    } else {
        WriteOutcome::Stale
    }
}
