//! Collaborator seams.
//!
//! The engine never touches the filesystem or a clock. Entities come in
//! through [`EntitySource`], finished rounds go out through [`ScoreSink`],
//! and both are implemented by `scacquiz-store` (or by test doubles).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Entity;

// ---------------------------------------------------------------------------
// Entity supply
// ---------------------------------------------------------------------------

/// Supplies the full entity set, in stable order.
///
/// Code uniqueness is this collaborator's responsibility; the engine
/// assumes every entity it sees has a distinct id and code.
pub trait EntitySource {
    fn list_entities(&self) -> anyhow::Result<Vec<Entity>>;
}

// ---------------------------------------------------------------------------
// Score recording
// ---------------------------------------------------------------------------

/// One finished round as recorded on the scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player: String,
    pub score: i32,
    pub correct: u32,
    pub asked: u32,
    pub finished_at: DateTime<Utc>,
}

/// Accepts one finished round. Called once per round by the orchestrating
/// caller, never by the engine itself.
pub trait ScoreSink {
    fn record_round(&self, record: &RoundRecord) -> anyhow::Result<()>;
}
