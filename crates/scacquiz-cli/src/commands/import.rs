//! The `scacquiz import` command: CSV rows into a TOML bank.

use std::path::PathBuf;

use anyhow::Result;

use scacquiz_store::bank::write_bank;
use scacquiz_store::csv::import_csv;

pub fn execute(csv_path: PathBuf, bank_path: PathBuf) -> Result<()> {
    let bank = import_csv(&csv_path)?;
    write_bank(&bank_path, &bank)?;
    println!(
        "Imported {} carrier(s) from {} into {}",
        bank.len(),
        csv_path.display(),
        bank_path.display()
    );
    Ok(())
}
