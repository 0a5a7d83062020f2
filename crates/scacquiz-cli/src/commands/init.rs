//! The `scacquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create scacquiz.toml
    if std::path::Path::new("scacquiz.toml").exists() {
        println!("scacquiz.toml already exists, skipping.");
    } else {
        std::fs::write("scacquiz.toml", SAMPLE_CONFIG)?;
        println!("Created scacquiz.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let starter_path = std::path::Path::new("banks/starter.toml");
    if starter_path.exists() {
        println!("banks/starter.toml already exists, skipping.");
    } else {
        std::fs::write(starter_path, STARTER_BANK)?;
        println!("Created banks/starter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: scacquiz validate --bank banks");
    println!("  2. Run: scacquiz play --player you");
    println!("  3. Add your own carriers, or import: scacquiz import --csv carriers.csv --bank banks/mine.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# scacquiz configuration

# Bank file or directory of banks to quiz from.
bank_path = "banks"

# Where finished rounds are recorded.
scores_path = "scacquiz-scores.json"

# Name written to the scoreboard.
player = "anonymous"

# Seconds allowed per question.
question_secs = 60

# Tuning overrides; unset values keep the engine defaults.
# [generator]
# bonus_probability = 0.15
# always_bonus_modes = ["Ocean", "Air"]
# distractor_count = 3
#
# [matcher]
# ratio_threshold = 0.8
# overlap_threshold = 0.6
"#;

const STARTER_BANK: &str = r#"[bank]
name = "Starter carriers"
description = "Well-known carriers across ship modes to learn the game with"

[[carriers]]
code = "BNSF"
name = "BNSF Railway"
mode = "Rail"
note = "Formed in the 1995 Burlington Northern and Santa Fe merger"

[[carriers]]
code = "CSXT"
name = "CSX Transportation"
mode = "Rail"

[[carriers]]
code = "ODFL"
name = "Old Dominion Freight Line"
mode = "LTL"
note = "Headquartered in Thomasville, North Carolina"

[[carriers]]
code = "SAIA"
name = "Saia Motor Freight Line"
mode = "LTL"

[[carriers]]
code = "JBHT"
name = "J.B. Hunt Transport"
mode = "Intermodal"
note = "Pioneered double-stack intermodal with the Santa Fe in 1989"

[[carriers]]
code = "SWFT"
name = "Swift Transportation"
mode = "Truckload"

[[carriers]]
code = "WERN"
name = "Werner Enterprises"
mode = "Truckload"
note = "Headquartered in Omaha, Nebraska"

[[carriers]]
code = "MAEU"
name = "Maersk Line"
mode = "Ocean"
note = "Operated the largest container fleet through the 2010s"

[[carriers]]
code = "HLCU"
name = "Hapag-Lloyd"
mode = "Ocean"

[[carriers]]
code = "FDEG"
name = "FedEx Ground"
mode = "Parcel"

[[carriers]]
code = "UPSN"
name = "United Parcel Service"
mode = "Parcel"
note = "Air hub at the Louisville Worldport"

[[carriers]]
code = "CNWY"
name = "Con-way Freight"
mode = "LTL"

[[carriers]]
code = "CWYT"
name = "Conway Freight"
mode = "Intermodal"
"#;
