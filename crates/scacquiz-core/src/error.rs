//! Typed errors for the engine and its storage collaborators.

use thiserror::Error;

/// Session state-machine misuse by the caller.
///
/// The engine itself never fails once a round is running; these only fire
/// when calls arrive in the wrong phase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A question was requested or an answer submitted with no round
    /// running.
    #[error("no round is active; call begin_round first")]
    RoundNotActive,
}

/// Failures from entity and score storage.
///
/// Defined beside the traits that produce them so callers can classify a
/// failure without matching on message strings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with an existing carrier code.
    #[error("duplicate carrier code: {code}")]
    DuplicateCode { code: String },

    /// A record arrived without a required field.
    #[error("missing required field '{field}' for {context}")]
    MissingField { field: String, context: String },

    /// A data file parsed but its content is unusable.
    #[error("malformed {kind} data: {message}")]
    Malformed { kind: String, message: String },

    /// An underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when the failure is a data conflict: retrying with the same
    /// input cannot succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateCode { .. })
    }
}
