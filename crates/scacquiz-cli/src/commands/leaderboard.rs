//! The `scacquiz leaderboard` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use scacquiz_store::config::load_config_from;
use scacquiz_store::scores::Scoreboard;

pub fn execute(top: usize, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let scoreboard = Scoreboard::new(config.scores_path.clone());

    let entries = scoreboard.leaderboard(top)?;
    if entries.is_empty() {
        println!("No rounds recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Best", "Rounds", "Correct", "Asked"]);
    for (rank, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.player),
            Cell::new(entry.best_score),
            Cell::new(entry.rounds),
            Cell::new(entry.total_correct),
            Cell::new(entry.total_asked),
        ]);
    }
    println!("{table}");

    Ok(())
}
