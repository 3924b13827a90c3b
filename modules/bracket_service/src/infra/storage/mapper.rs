//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{Match, MatchStatus, Participant, ParticipantStatus};
use anyhow::{anyhow, Context};

// ===== Match Conversions =====

impl TryFrom<entity::Model> for Match {
    type Error = anyhow::Error;

    fn try_from(entity: entity::Model) -> Result<Self, Self::Error> {
        let status: MatchStatus = entity.status.parse().map_err(|e: String| anyhow!(e))?;

        Ok(Self {
            id: entity.id,
            tournament_id: entity.tournament_id,
            round: u32::try_from(entity.round).context("negative round")?,
            match_number: u32::try_from(entity.match_number).context("negative match number")?,
            player1_id: entity.player1_id,
            player2_id: entity.player2_id,
            source_match1: entity.source_match1.map(u32::try_from).transpose()?,
            source_match2: entity.source_match2.map(u32::try_from).transpose()?,
            winner_id: entity.winner_id,
            status,
            score1: entity.score1.map(u32::try_from).transpose()?,
            score2: entity.score2.map(u32::try_from).transpose()?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&Match> for entity::ActiveModel {
    fn from(model: &Match) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(model.id),
            tournament_id: Set(model.tournament_id),
            round: Set(model.round as i32),
            match_number: Set(model.match_number as i32),
            player1_id: Set(model.player1_id),
            player2_id: Set(model.player2_id),
            source_match1: Set(model.source_match1.map(|n| n as i32)),
            source_match2: Set(model.source_match2.map(|n| n as i32)),
            winner_id: Set(model.winner_id),
            status: Set(model.status.as_str().to_string()),
            score1: Set(model.score1.map(i64::from)),
            score2: Set(model.score2.map(i64::from)),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Participant Conversions =====

impl TryFrom<entity::participant::Model> for Participant {
    type Error = anyhow::Error;

    fn try_from(entity: entity::participant::Model) -> Result<Self, Self::Error> {
        let status: ParticipantStatus = entity.status.parse().map_err(|e: String| anyhow!(e))?;

        Ok(Self {
            id: entity.id,
            tournament_id: entity.tournament_id,
            display_name: entity.display_name,
            status,
            registered_at: entity.registered_at,
        })
    }
}

impl From<&Participant> for entity::participant::ActiveModel {
    fn from(model: &Participant) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Set(model.id),
            tournament_id: Set(model.tournament_id),
            display_name: Set(model.display_name.clone()),
            status: Set(model.status.as_str().to_string()),
            registered_at: Set(model.registered_at),
        }
    }
}
