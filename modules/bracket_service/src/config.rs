//! Configuration for bracket service module

use crate::contract::BracketError;
use serde::{Deserialize, Serialize};

/// Bracket service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Largest bracket that may be generated (power of two)
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,

    /// Publish bracket events to subscribers
    #[serde(default = "default_true")]
    pub publish_events: bool,

    /// Buffer size of the in-process event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_participants: default_max_participants(),
            publish_events: true,
            event_buffer: default_event_buffer(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), BracketError> {
        if self.max_participants < 2 || !self.max_participants.is_power_of_two() {
            return Err(BracketError::validation(format!(
                "max_participants must be a power of two >= 2, got {}",
                self.max_participants
            )));
        }
        if self.event_buffer == 0 {
            return Err(BracketError::validation("event_buffer must be positive"));
        }
        Ok(())
    }
}

fn default_max_participants() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_event_buffer() -> usize {
    256
}
