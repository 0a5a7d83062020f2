//! The `scacquiz export` command: a bank (or directory) back out to CSV.

use std::path::PathBuf;

use anyhow::Result;

use scacquiz_store::bank::load_merged;
use scacquiz_store::csv::export_csv;

pub fn execute(bank_path: PathBuf, csv_path: PathBuf) -> Result<()> {
    let bank = load_merged(&bank_path)?;
    export_csv(&csv_path, bank.entities())?;
    println!(
        "Exported {} carrier(s) to {}",
        bank.len(),
        csv_path.display()
    );
    Ok(())
}
