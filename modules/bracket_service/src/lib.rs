//! Bracket Service Module
//!
//! Single-elimination tournament brackets: seeding of accepted participants,
//! generation of the full match tree and advancement of winners through it.
//! Persistence is injected through the repository traits in `domain`.

// Public exports
pub mod contract;
pub use contract::{
    client::BracketApi, error::BracketError, Bracket, BracketRound, Match, MatchStatus, NewMatch,
    Participant, ParticipantStatus, RecordedResult, Slot,
};

pub mod module;
pub use module::BracketServiceModule;

pub mod config;
pub use config::Config;

pub mod domain;
pub use domain::Service;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod infra;
