//! CSV import and export of carrier records.
//!
//! Column layout is `code,name,mode,note`, with `note` optional so
//! three-column files import cleanly. Import reports the line number of
//! the first bad row; export writes the sentinel out literally so a
//! round trip preserves it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scacquiz_core::model::Entity;

use crate::bank::Bank;

/// One CSV row.
#[derive(Debug, Serialize, Deserialize)]
struct CsvCarrier {
    code: String,
    name: String,
    mode: String,
    #[serde(default)]
    note: Option<String>,
}

/// Import carriers from a CSV file into a fresh bank named after the
/// file. Duplicate codes fail the import.
pub fn import_csv(path: &Path) -> Result<Bank> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open CSV: {}", path.display()))?;

    let bank_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("imported");
    let mut bank = Bank::new(bank_name, "imported from CSV");

    for (index, row) in reader.deserialize::<CsvCarrier>().enumerate() {
        // Header occupies line one.
        let line = index + 2;
        let carrier = row.with_context(|| format!("bad CSV row at line {line}"))?;
        bank.insert(
            &carrier.code,
            &carrier.name,
            &carrier.mode,
            carrier.note.as_deref(),
        )
        .with_context(|| format!("CSV row at line {line}"))?;
    }
    Ok(bank)
}

/// Export carriers to CSV with the canonical column layout.
pub fn export_csv(path: &Path, entities: &[Entity]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV: {}", path.display()))?;

    for entity in entities {
        writer
            .serialize(CsvCarrier {
                code: entity.code.clone(),
                name: entity.name.clone(),
                mode: entity.mode.clone(),
                note: Some(entity.note.clone()),
            })
            .context("failed to write CSV row")?;
    }
    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}
