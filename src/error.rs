//! Error taxonomy for the progression engine.
//!
//! Cooldown and resource errors are recoverable and user-facing with no
//! state change. Generation errors degrade to a visible, retryable
//! "generating" state and never drop already-earned rewards. Invariant
//! violations refuse the operation outright.

use chrono::{DateTime, Utc};

use crate::generator::GenerationError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Action attempted while a cooldown or lockout is still running.
    #[error("cooldown active until {until}")]
    CooldownActive { until: DateTime<Utc> },

    /// External content generation failed, timed out, or returned a
    /// malformed shape.
    #[error("content generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Not enough fragments, tickets, crystals, or lives.
    #[error("not enough {resource}")]
    InsufficientResource { resource: &'static str },

    /// The requested operation would break an engine invariant
    /// (unknown id, double completion, revert with no history, ...).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    pub(crate) fn unknown(entity: &str, id: u64) -> Self {
        Self::InvariantViolation(format!("unknown {entity} id {id}"))
    }
}
