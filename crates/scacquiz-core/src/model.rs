//! Core data model for the quiz engine.
//!
//! [`Entity`] is the quizzable carrier record, [`Question`] the ephemeral
//! value object handed to the presenter, and [`RoundState`] the running
//! totals for one round. Everything here is plain data; behavior lives in
//! the generator, evaluator, and session modules.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder stored in [`Entity::note`] when a carrier has no annotation.
///
/// The field is always present; "no note" is this sentinel or an empty
/// string, and [`Entity::has_note`] is the one place that distinction is
/// made.
pub const NOTE_SENTINEL: &str = "N/A";

fn default_note() -> String {
    NOTE_SENTINEL.to_string()
}

/// A quizzable freight carrier record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Opaque unique key, assigned when the record is loaded.
    pub id: Uuid,
    /// Standard Carrier Alpha Code, upper-cased and unique within a bank.
    pub code: String,
    /// Carrier name, possibly carrying a parenthetical qualifier such as
    /// "(Midwest)".
    pub name: String,
    /// Ship mode, e.g. "Truckload", "LTL", "Rail", "Ocean".
    pub mode: String,
    /// Free-form annotation; the sentinel when the source had none.
    #[serde(default = "default_note")]
    pub note: String,
}

impl Entity {
    /// Build an entity with a fresh id. The code is trimmed and
    /// upper-cased; a blank or missing note becomes the sentinel.
    pub fn new(code: &str, name: &str, mode: &str, note: Option<&str>) -> Self {
        let note = match note {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => NOTE_SENTINEL.to_string(),
        };
        Self {
            id: Uuid::new_v4(),
            code: code.trim().to_uppercase(),
            name: name.trim().to_string(),
            mode: mode.trim().to_string(),
            note,
        }
    }

    /// True when the note carries real content, i.e. it is non-empty and
    /// not the sentinel (compared case-insensitively).
    pub fn has_note(&self) -> bool {
        let trimmed = self.note.trim();
        !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(NOTE_SENTINEL)
    }
}

/// The interaction form of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Typed answer, checked by the layered fuzzy matcher.
    FreeText,
    /// Pick one option from [`Question::choices`].
    SingleChoice,
    /// Pick every applicable option from [`Question::choices`].
    MultiChoice,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::FreeText => write!(f, "free-text"),
            Shape::SingleChoice => write!(f, "single-choice"),
            Shape::MultiChoice => write!(f, "multi-choice"),
        }
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free-text" | "freetext" | "text" => Ok(Shape::FreeText),
            "single-choice" | "single" => Ok(Shape::SingleChoice),
            "multi-choice" | "multi" => Ok(Shape::MultiChoice),
            _ => Err(format!("unknown question shape: {s}")),
        }
    }
}

/// The canonical answer a submission is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    /// A single canonical string (free-text and single-choice questions).
    Text(String),
    /// An exact set of strings (multi-choice questions).
    Set(BTreeSet<String>),
}

/// One generated question.
///
/// Produced by the generator, shown by the presenter, consumed once by the
/// evaluator. Never persisted and never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub shape: Shape,
    /// Full prompt text, ready to display.
    pub prompt: String,
    pub expected: Expected,
    /// Options to offer, already shuffled; empty for free-text.
    pub choices: Vec<String>,
    /// The entity this question was generated from.
    pub entity_id: Uuid,
    /// Optional nudge the presenter may reveal.
    pub hint: String,
    /// Bonus questions score double on success and cost nothing on failure.
    pub bonus: bool,
}

/// Outcome of one answered question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attempt {
    pub correct: bool,
    /// Signed point delta folded into the round score.
    pub delta: i32,
    pub elapsed_secs: f64,
}

/// Running totals for one round.
///
/// Reset exactly once, at round start; `asked_ids` only grows while the
/// round runs, which is what guarantees no entity repeats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub score: i32,
    pub correct_count: u32,
    pub asked_count: u32,
    pub asked_ids: HashSet<Uuid>,
}

impl RoundState {
    pub fn incorrect_count(&self) -> u32 {
        self.asked_count - self.correct_count
    }
}
