//! JSON import and export of knowledge banks
//!
//! A bank is stored as an array of records, one per archetype, in natural archetype
//! order:
//!
//! ```json
//! [
//!   {
//!     "archetype": { "faction": "Ogor Mawtribes", "label": "Kragnos Beastclaw Raiders" },
//!     "lists": [
//!       {
//!         "faction": "Ogor Mawtribes",
//!         "warscrolls": [{ "name": "Frostlord on Stonehorn", "count": 1 }],
//!         "enhancements": [{ "name": "Metalcruncher", "count": 1 }]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Stored files are hand editable, so loading trusts nothing: every list is validated
//! and canonicalised again, and filed through [KnowledgeBank::insert].

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

use super::{Archetype, KnowledgeBank};
use crate::army::error::StoreError;
use crate::army::items::{CanonicalArmyList, FlatArmyList};

#[derive(Serialize)]
struct RecordRef<'a> {
    archetype: &'a Archetype,
    lists: &'a [CanonicalArmyList],
}

#[derive(Deserialize)]
struct Record {
    archetype: Archetype,
    lists: Vec<FlatArmyList>,
}

/// Write a bank as pretty printed JSON.
pub fn to_writer<W: Write>(bank: &KnowledgeBank, writer: W) -> Result<(), StoreError> {
    let records: Vec<RecordRef> = bank
        .iter()
        .map(|(archetype, lists)| RecordRef { archetype, lists })
        .collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Read a bank from JSON.
pub fn from_reader<R: Read>(reader: R) -> Result<KnowledgeBank, StoreError> {
    let records: Vec<Record> = serde_json::from_reader(reader)?;

    let mut bank = KnowledgeBank::new();
    for record in records {
        for list in record.lists {
            list.validate()?;
            bank.insert(record.archetype.clone(), list)?;
        }
    }
    Ok(bank)
}

/// Save a bank to a file, replacing its contents.
pub fn save(bank: &KnowledgeBank, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    to_writer(bank, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), lists = bank.len(), "saved knowledge bank");
    Ok(())
}

/// Load a bank from a file.
pub fn load(path: impl AsRef<Path>) -> Result<KnowledgeBank, StoreError> {
    let path = path.as_ref();
    let bank = from_reader(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), lists = bank.len(), "loaded knowledge bank");
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::error::{ArmyListError, BankError};
    use crate::army::items::{Enhancement, Faction, Warscroll};

    fn ogors() -> Faction {
        Faction::new("Ogor Mawtribes")
    }

    fn sample_bank() -> KnowledgeBank {
        let list = FlatArmyList::new(
            ogors(),
            vec![
                Warscroll::new("Mournfang Pack", 3),
                Warscroll::new("Frostlord on Stonehorn", 1),
            ],
            vec![Enhancement::new("Metalcruncher", 1)],
        )
        .unwrap();
        let mut bank = KnowledgeBank::new();
        bank.insert(Archetype::new(ogors(), "Kragnos Beastclaw Raiders"), list)
            .unwrap();
        bank
    }

    #[test]
    fn test_bank_survives_a_round_trip() {
        let bank = sample_bank();
        let mut buffer = Vec::new();
        to_writer(&bank, &mut buffer).unwrap();

        assert_eq!(from_reader(buffer.as_slice()).unwrap(), bank);
    }

    #[test]
    fn test_loading_canonicalises_lists() {
        let json = r#"[{
            "archetype": { "faction": "Ogor Mawtribes", "label": "Kragnos Beastclaw Raiders" },
            "lists": [{
                "faction": "Ogor Mawtribes",
                "warscrolls": [
                    { "name": "Mournfang Pack", "count": 3 },
                    { "name": "Frostlord on Stonehorn", "count": 1 }
                ],
                "enhancements": []
            }]
        }]"#;
        let bank = from_reader(json.as_bytes()).unwrap();
        let archetype = Archetype::new(ogors(), "Kragnos Beastclaw Raiders");

        assert!(bank.lists(&archetype)[0].is_canonical());
    }

    #[test]
    fn test_loading_rejects_duplicate_items() {
        let json = r#"[{
            "archetype": { "faction": "Ogor Mawtribes", "label": "Gutbusters" },
            "lists": [{
                "faction": "Ogor Mawtribes",
                "warscrolls": [
                    { "name": "Ogor Gluttons", "count": 1 },
                    { "name": "Ogor Gluttons", "count": 2 }
                ],
                "enhancements": []
            }]
        }]"#;
        let err = from_reader(json.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ArmyList(ArmyListError::DuplicateWarscroll(ref name)) if name == "Ogor Gluttons"
        ));
    }

    #[test]
    fn test_loading_rejects_cross_faction_records() {
        let json = r#"[{
            "archetype": { "faction": "Ironjawz", "label": "Big Waaagh!" },
            "lists": [{ "faction": "Ogor Mawtribes", "warscrolls": [], "enhancements": [] }]
        }]"#;
        let err = from_reader(json.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Bank(BankError::FactionMismatch { .. })
        ));
    }

    #[test]
    fn test_loading_rejects_malformed_json() {
        let err = from_reader("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        let bank = sample_bank();

        save(&bank, &path).unwrap();
        assert_eq!(load(&path).unwrap(), bank);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
