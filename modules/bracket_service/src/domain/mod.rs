//! Domain layer - bracket engine and orchestration service

pub mod advancement;
pub mod builder;
pub mod events;
pub mod progress;
pub mod repository;
pub mod seeding;
pub mod service;

pub use events::{BracketEvent, BroadcastEventPublisher, EventPublisher, NoOpEventPublisher};
pub use repository::{MatchRepository, ParticipantRepository, WriteOutcome};
pub use service::Service;
