//! Error types for blame-context.

use crate::lifecycle::{ListenerFault, ListenerId};
use thiserror::Error;

/// Errors raised by context stacks, lifecycle dispatch, and configuration.
///
/// Faults raised by a wrapped action are never converted into this type:
/// `Err` values and panics from the action pass through unchanged.
#[derive(Debug, Error)]
pub enum BlameError {
    /// A pop asked for more frames than the stack holds. Always a caller bug.
    #[error("Invariant violation in context '{context}': cannot pop {requested} frame(s) from depth {depth}")]
    InvariantViolation {
        context: &'static str,
        requested: usize,
        depth: usize,
    },

    /// A scope closed against a stack that was not at the depth it left it at.
    #[error("Invariant violation in context '{context}': scope expected depth {expected}, found {actual}")]
    ScopeImbalance {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Lifecycle listener {listener} failed: {source}")]
    ListenerFailed {
        listener: ListenerId,
        #[source]
        source: ListenerFault,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BlameError {
    /// True for push/pop mismatches, which indicate a programming error.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            BlameError::InvariantViolation { .. } | BlameError::ScopeImbalance { .. }
        )
    }
}

impl From<config::ConfigError> for BlameError {
    fn from(err: config::ConfigError) -> Self {
        BlameError::ConfigError(err.to_string())
    }
}
