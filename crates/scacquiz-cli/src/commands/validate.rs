//! The `scacquiz validate` command.

use std::path::PathBuf;

use anyhow::{ensure, Result};

use scacquiz_store::bank::{
    cross_bank_duplicates, load_bank_directory, parse_bank, validate_bank, ValidationWarning,
};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        load_bank_directory(&bank_path)?
    } else {
        vec![parse_bank(&bank_path)?]
    };
    ensure!(!banks.is_empty(), "no bank files found at {}", bank_path.display());

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Bank: {} ({} carriers)", bank.name, bank.len());

        let warnings = validate_bank(bank);
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    let cross = cross_bank_duplicates(&banks);
    print_warnings(&cross);
    total_warnings += cross.len();

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .code
            .as_ref()
            .map(|code| format!("  [{code}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
