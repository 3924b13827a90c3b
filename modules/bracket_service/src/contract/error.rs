//! Contract error types for bracket service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Bracket service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BracketError {
    /// Bad input: participant count, duplicate generation, malformed slots
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },
    /// Result rejected: missing players, already completed, winner not in match
    #[error("Invalid result: {reason}")]
    InvalidResult {
        /// Rejection reason
        reason: String,
    },
    /// Broken bracket invariant, e.g. an advancement slot that is already occupied
    #[error("Invalid state: {reason}")]
    InvalidState {
        /// Invariant that was violated
        reason: String,
    },
    /// Illegal lifecycle transition (e.g. starting a match that is not pending)
    #[error("Conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Match or bracket not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (match, bracket)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Storage or other internal failure
    #[error("Internal error")]
    Internal,
}

impl BracketError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_result(reason: impl Into<String>) -> Self {
        Self::InvalidResult {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}
