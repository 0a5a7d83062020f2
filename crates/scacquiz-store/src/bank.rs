//! TOML carrier banks.
//!
//! A bank file holds a `[bank]` header and `[[carriers]]` entries. Loading
//! assigns ids, upper-cases codes, applies the note sentinel, and rejects
//! duplicate codes; directory loading recurses and skips unparseable files
//! with a warning so one bad bank does not block play.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use scacquiz_core::error::StoreError;
use scacquiz_core::model::Entity;
use scacquiz_core::traits::EntitySource;

/// Intermediate TOML structure for a bank file.
#[derive(Debug, Serialize, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    carriers: Vec<TomlCarrier>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlBankHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlCarrier {
    code: String,
    name: String,
    mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

/// A named, loaded set of carriers with unique codes.
#[derive(Debug, Clone)]
pub struct Bank {
    pub name: String,
    pub description: String,
    entities: Vec<Entity>,
    by_code: HashMap<String, usize>,
}

impl Bank {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            entities: Vec::new(),
            by_code: HashMap::new(),
        }
    }

    /// Insert one carrier. The code is trimmed and upper-cased before the
    /// uniqueness check; a blank note becomes the sentinel.
    pub fn insert(
        &mut self,
        code: &str,
        name: &str,
        mode: &str,
        note: Option<&str>,
    ) -> Result<(), StoreError> {
        let code_norm = code.trim().to_uppercase();
        if code_norm.is_empty() {
            return Err(StoreError::MissingField {
                field: "code".to_string(),
                context: format!("carrier '{}'", name.trim()),
            });
        }
        if name.trim().is_empty() {
            return Err(StoreError::MissingField {
                field: "name".to_string(),
                context: format!("carrier {code_norm}"),
            });
        }
        if self.by_code.contains_key(&code_norm) {
            return Err(StoreError::DuplicateCode { code: code_norm });
        }

        self.by_code.insert(code_norm.clone(), self.entities.len());
        self.entities.push(Entity::new(&code_norm, name, mode, note));
        Ok(())
    }

    /// Carriers in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up a carrier by code, case-insensitively.
    pub fn get_by_code(&self, code: &str) -> Option<&Entity> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|&index| &self.entities[index])
    }
}

impl EntitySource for Bank {
    fn list_entities(&self) -> Result<Vec<Entity>> {
        Ok(self.entities.clone())
    }
}

/// Parse a single TOML bank file.
pub fn parse_bank(path: &Path) -> Result<Bank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;
    parse_bank_str(&content, path)
}

/// Parse TOML bank content. Split out from [`parse_bank`] so tests can
/// feed strings directly.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<Bank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse bank TOML: {}", source_path.display()))?;

    let mut bank = Bank::new(&parsed.bank.name, &parsed.bank.description);
    for carrier in &parsed.carriers {
        bank.insert(
            &carrier.code,
            &carrier.name,
            &carrier.mode,
            carrier.note.as_deref(),
        )
        .with_context(|| format!("in bank file {}", source_path.display()))?;
    }
    Ok(bank)
}

/// Render a bank back to TOML. Ids are load-time artifacts and do not
/// persist; the sentinel note round-trips as written.
pub fn bank_to_toml(bank: &Bank) -> Result<String> {
    let file = TomlBankFile {
        bank: TomlBankHeader {
            name: bank.name.clone(),
            description: bank.description.clone(),
        },
        carriers: bank
            .entities()
            .iter()
            .map(|e| TomlCarrier {
                code: e.code.clone(),
                name: e.name.clone(),
                mode: e.mode.clone(),
                note: Some(e.note.clone()),
            })
            .collect(),
    };
    toml::to_string_pretty(&file).context("failed to render bank TOML")
}

/// Write a bank to disk, creating parent directories as needed.
pub fn write_bank(path: &Path, bank: &Bank) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bank_to_toml(bank)?)
        .with_context(|| format!("failed to write bank to {}", path.display()))?;
    Ok(())
}

/// Recursively load every `.toml` bank under a directory.
///
/// Files that fail to parse are skipped with a warning rather than
/// aborting the whole load.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<Bank>> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }

    let mut banks = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => warn!("skipping {}: {:#}", path.display(), e),
            }
        }
    }
    Ok(banks)
}

/// Load a bank file, or merge every bank under a directory into one pool.
///
/// Cross-file duplicate codes keep the first occurrence and skip the rest
/// with a warning.
pub fn load_merged(path: &Path) -> Result<Bank> {
    if !path.is_dir() {
        return parse_bank(path);
    }

    let banks = load_bank_directory(path)?;
    ensure!(!banks.is_empty(), "no bank files found under {}", path.display());

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("banks");
    let mut merged = Bank::new(name, "");
    for bank in &banks {
        for entity in bank.entities() {
            if let Err(err) =
                merged.insert(&entity.code, &entity.name, &entity.mode, Some(entity.note.as_str()))
            {
                if err.is_conflict() {
                    warn!(
                        "skipping duplicate code {} from bank '{}'",
                        entity.code, bank.name
                    );
                } else {
                    return Err(err).with_context(|| format!("merging bank '{}'", bank.name));
                }
            }
        }
    }
    Ok(merged)
}

/// A content problem that loads fine but plays badly.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending carrier code, when attributable to one.
    pub code: Option<String>,
    pub message: String,
}

/// Check a parsed bank for content that will degrade play.
pub fn validate_bank(bank: &Bank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.is_empty() {
        warnings.push(ValidationWarning {
            code: None,
            message: "bank has no carriers".to_string(),
        });
        return warnings;
    }

    if bank.len() < 4 {
        warnings.push(ValidationWarning {
            code: None,
            message: format!(
                "only {} carrier(s); choice questions need distractors",
                bank.len()
            ),
        });
    }

    let mut name_counts: HashMap<String, usize> = HashMap::new();
    for entity in bank.entities() {
        *name_counts.entry(entity.name.clone()).or_insert(0) += 1;

        if entity.mode.is_empty() {
            warnings.push(ValidationWarning {
                code: Some(entity.code.clone()),
                message: "carrier has no ship mode".to_string(),
            });
        }

        let looks_like_scac = (2..=4).contains(&entity.code.len())
            && entity.code.chars().all(|c| c.is_ascii_alphabetic());
        if !looks_like_scac {
            warnings.push(ValidationWarning {
                code: Some(entity.code.clone()),
                message: format!("code '{}' is not 2-4 letters", entity.code),
            });
        }
    }

    for (name, count) in name_counts {
        if count > 1 {
            warnings.push(ValidationWarning {
                code: None,
                message: format!("carrier name '{name}' appears {count} times"),
            });
        }
    }

    warnings
}

/// Codes that appear in more than one bank.
pub fn cross_bank_duplicates(banks: &[Bank]) -> Vec<ValidationWarning> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut warnings = Vec::new();

    for bank in banks {
        for entity in bank.entities() {
            match seen.get(entity.code.as_str()) {
                Some(first_bank) => warnings.push(ValidationWarning {
                    code: Some(entity.code.clone()),
                    message: format!(
                        "code {} appears in both '{}' and '{}'",
                        entity.code, first_bank, bank.name
                    ),
                }),
                None => {
                    seen.insert(&entity.code, &bank.name);
                }
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use scacquiz_core::model::NOTE_SENTINEL;
    use tempfile::TempDir;

    const FULL_BANK: &str = r#"
[bank]
name = "National carriers"
description = "Class I rail and national LTL"

[[carriers]]
code = "bnsf"
name = "BNSF Railway"
mode = "Rail"
note = "Formed in the 1995 Burlington Northern and Santa Fe merger"

[[carriers]]
code = "ODFL"
name = "Old Dominion Freight Line"
mode = "LTL"

[[carriers]]
code = "MAEU"
name = "Maersk Line"
mode = "Ocean"
note = ""
"#;

    #[test]
    fn parses_a_full_bank() {
        let bank = parse_bank_str(FULL_BANK, Path::new("test.toml")).unwrap();
        assert_eq!(bank.name, "National carriers");
        assert_eq!(bank.len(), 3);

        let bnsf = bank.get_by_code("BNSF").unwrap();
        assert_eq!(bnsf.code, "BNSF", "codes are upper-cased on load");
        assert!(bnsf.has_note());

        let odfl = bank.get_by_code("odfl").unwrap();
        assert_eq!(odfl.note, NOTE_SENTINEL);

        let maersk = bank.get_by_code("MAEU").unwrap();
        assert_eq!(maersk.note, NOTE_SENTINEL, "blank notes become the sentinel");
    }

    #[test]
    fn minimal_header_is_enough() {
        let bank = parse_bank_str(
            r#"
[bank]
name = "Tiny"

[[carriers]]
code = "AAAA"
name = "Alpha Freight"
mode = "Truckload"
"#,
            Path::new("tiny.toml"),
        )
        .unwrap();
        assert_eq!(bank.description, "");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn duplicate_codes_fail_the_parse() {
        let err = parse_bank_str(
            r#"
[bank]
name = "Dupes"

[[carriers]]
code = "AAAA"
name = "Alpha Freight"
mode = "Truckload"

[[carriers]]
code = "aaaa"
name = "Alpha Freight Again"
mode = "LTL"
"#,
            Path::new("dupes.toml"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("duplicate carrier code: AAAA"));
    }

    #[test]
    fn missing_carrier_name_key_fails() {
        let err = parse_bank_str(
            r#"
[bank]
name = "Broken"

[[carriers]]
code = "AAAA"
mode = "Truckload"
"#,
            Path::new("broken.toml"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }

    #[test]
    fn empty_carrier_name_fails() {
        let err = parse_bank_str(
            r#"
[bank]
name = "Broken"

[[carriers]]
code = "AAAA"
name = "  "
mode = "Truckload"
"#,
            Path::new("broken.toml"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("missing required field 'name'"));
    }

    #[test]
    fn malformed_toml_fails() {
        let err = parse_bank_str("not [ valid { toml", Path::new("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse bank TOML"));
    }

    #[test]
    fn bank_round_trips_through_toml() {
        let original = parse_bank_str(FULL_BANK, Path::new("test.toml")).unwrap();
        let rendered = bank_to_toml(&original).unwrap();
        let back = parse_bank_str(&rendered, Path::new("rendered.toml")).unwrap();

        assert_eq!(back.name, original.name);
        assert_eq!(back.len(), original.len());
        for (a, b) in back.entities().iter().zip(original.entities()) {
            assert_eq!(a.code, b.code);
            assert_eq!(a.name, b.name);
            assert_eq!(a.mode, b.mode);
            assert_eq!(a.note, b.note);
        }
    }

    #[test]
    fn directory_loading_recurses_and_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("good.toml"), FULL_BANK).unwrap();
        std::fs::write(
            dir.path().join("nested/also_good.toml"),
            r#"
[bank]
name = "Nested"

[[carriers]]
code = "ZZZZ"
name = "Zulu Lines"
mode = "Ocean"
"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml at all [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 2);
    }

    #[test]
    fn load_merged_pools_directories_and_keeps_first_duplicate() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("a.toml"),
            r#"
[bank]
name = "First"

[[carriers]]
code = "AAAA"
name = "Alpha Freight"
mode = "Truckload"
"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            r#"
[bank]
name = "Second"

[[carriers]]
code = "AAAA"
name = "Alpha Freight Imposter"
mode = "LTL"

[[carriers]]
code = "BBBB"
name = "Beta Lines"
mode = "LTL"
"#,
        )
        .unwrap();

        let merged = load_merged(dir.path()).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_by_code("AAAA").unwrap().name, "Alpha Freight");
        assert!(merged.get_by_code("BBBB").is_some());
    }

    #[test]
    fn load_merged_on_empty_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(load_merged(dir.path()).is_err());
    }

    #[test]
    fn validation_flags_playability_problems() {
        let mut bank = Bank::new("Problems", "");
        bank.insert("AAAA", "Alpha Freight", "Truckload", None).unwrap();
        bank.insert("BBBB", "Alpha Freight", "", None).unwrap();
        bank.insert("TOOLONG", "Gamma Rail", "Rail", None).unwrap();

        let warnings = validate_bank(&bank);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();

        assert!(messages.iter().any(|m| m.contains("choice questions")));
        assert!(messages.iter().any(|m| m.contains("no ship mode")));
        assert!(messages.iter().any(|m| m.contains("not 2-4 letters")));
        assert!(messages.iter().any(|m| m.contains("'Alpha Freight' appears 2 times")));
    }

    #[test]
    fn empty_bank_is_a_single_warning() {
        let bank = Bank::new("Empty", "");
        let warnings = validate_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no carriers"));
    }

    #[test]
    fn clean_bank_validates_without_warnings() {
        let mut bank = Bank::new("Clean", "");
        bank.insert("AAAA", "Alpha Freight", "Truckload", None).unwrap();
        bank.insert("BBBB", "Beta Lines", "LTL", None).unwrap();
        bank.insert("CCCC", "Gamma Rail", "Rail", None).unwrap();
        bank.insert("DDDD", "Delta Carriers", "Ocean", None).unwrap();
        assert!(validate_bank(&bank).is_empty());
    }

    #[test]
    fn cross_bank_duplicates_are_reported() {
        let mut first = Bank::new("First", "");
        first.insert("AAAA", "Alpha Freight", "Truckload", None).unwrap();
        let mut second = Bank::new("Second", "");
        second.insert("AAAA", "Alpha Imposter", "LTL", None).unwrap();
        second.insert("BBBB", "Beta Lines", "LTL", None).unwrap();

        let warnings = cross_bank_duplicates(&[first, second]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code.as_deref(), Some("AAAA"));
        assert!(warnings[0].message.contains("'First'"));
        assert!(warnings[0].message.contains("'Second'"));
    }

    #[test]
    fn list_entities_preserves_insertion_order() {
        let bank = parse_bank_str(FULL_BANK, Path::new("test.toml")).unwrap();
        let entities = bank.list_entities().unwrap();
        let codes: Vec<&str> = entities.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["BNSF", "ODFL", "MAEU"]);
    }
}
