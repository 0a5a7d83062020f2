//! Score persistence and leaderboard aggregation.
//!
//! Rounds append to one JSON file. The store is stateless between calls:
//! every append loads, modifies, and rewrites the file, so a missing file
//! is simply an empty board.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scacquiz_core::traits::{RoundRecord, ScoreSink};

/// On-disk shape of the score file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    records: Vec<RoundRecord>,
}

/// File-backed score store.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    path: PathBuf,
}

/// One player's line on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub best_score: i32,
    pub rounds: u32,
    pub total_correct: u32,
    pub total_asked: u32,
}

impl Scoreboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every recorded round, oldest first. An absent file is an empty
    /// board, not an error.
    pub fn records(&self) -> Result<Vec<RoundRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read scores from {}", self.path.display()))?;
        let file: ScoreFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse scores in {}", self.path.display()))?;
        Ok(file.records)
    }

    /// Append one round and rewrite the file.
    pub fn append(&self, record: &RoundRecord) -> Result<()> {
        let mut records = self.records()?;
        records.push(record.clone());

        let json = serde_json::to_string_pretty(&ScoreFile { records })
            .context("failed to serialize scores")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write scores to {}", self.path.display()))?;
        Ok(())
    }

    /// Best score per player, highest first, ties broken by name so the
    /// order is stable. `top` caps the number of rows.
    pub fn leaderboard(&self, top: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut per_player: HashMap<String, LeaderboardEntry> = HashMap::new();

        for record in self.records()? {
            let entry = per_player
                .entry(record.player.clone())
                .or_insert_with(|| LeaderboardEntry {
                    player: record.player.clone(),
                    best_score: record.score,
                    rounds: 0,
                    total_correct: 0,
                    total_asked: 0,
                });
            entry.best_score = entry.best_score.max(record.score);
            entry.rounds += 1;
            entry.total_correct += record.correct;
            entry.total_asked += record.asked;
        }

        let mut entries: Vec<LeaderboardEntry> = per_player.into_values().collect();
        entries.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then_with(|| a.player.cmp(&b.player))
        });
        entries.truncate(top);
        Ok(entries)
    }
}

impl ScoreSink for Scoreboard {
    fn record_round(&self, record: &RoundRecord) -> Result<()> {
        self.append(record)
    }
}
