//! Duplicate-id detection.
//!
//! A `(type, id)` pair identifies a document. When several files declare the
//! same pair, every copy is still linted; the collision is reported here.

use std::collections::HashMap;
use std::path::Path;

use lore_core::IdentityRecord;
use serde::{Deserialize, Serialize};

/// A `(type, id)` pair declared by more than one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DuplicateId {
    /// Declared `type`.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Declared `id`.
    pub id: String,
    /// Every file declaring the pair, in input order. Always two or more.
    ///
    /// Held as display text so the report serializes for any file name.
    pub paths: Vec<String>,
}

impl std::fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: declared in", self.doc_type, self.id)?;
        for path in &self.paths {
            write!(f, " {path}")?;
        }
        Ok(())
    }
}

/// Group identities by `(type, id)` and return the groups with more than
/// one path, in the order each pair was first seen.
pub fn detect_duplicate_ids(records: impl IntoIterator<Item = IdentityRecord>) -> Vec<DuplicateId> {
    let mut groups: Vec<DuplicateId> = Vec::new();
    let mut by_key: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let key = (record.doc_type, record.id);
        let path = display_path(&record.path);
        match by_key.get(&key) {
            Some(&slot) => groups[slot].paths.push(path),
            None => {
                by_key.insert(key.clone(), groups.len());
                groups.push(DuplicateId {
                    doc_type: key.0,
                    id: key.1,
                    paths: vec![path],
                });
            }
        }
    }

    groups.retain(|group| group.paths.len() > 1);
    groups
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doc_type: &str, id: &str, path: &str) -> IdentityRecord {
        IdentityRecord {
            doc_type: doc_type.into(),
            id: id.into(),
            path: path.into(),
        }
    }

    #[test]
    fn test_unique_ids_produce_nothing() {
        let dups = detect_duplicate_ids(vec![
            record("character", "kael-nyx", "characters/kael.md"),
            record("character", "mira", "characters/mira.md"),
        ]);
        assert!(dups.is_empty());
    }

    #[test]
    fn test_same_id_in_two_files() {
        let dups = detect_duplicate_ids(vec![
            record("character", "kael-nyx", "characters/kael.md"),
            record("place", "docks", "places/docks.md"),
            record("character", "kael-nyx", "characters/kael-copy.md"),
        ]);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].doc_type, "character");
        assert_eq!(dups[0].id, "kael-nyx");
        assert_eq!(
            dups[0].paths,
            vec!["characters/kael.md", "characters/kael-copy.md"]
        );
    }

    #[test]
    fn test_same_id_different_type_is_not_duplicate() {
        let dups = detect_duplicate_ids(vec![
            record("character", "tide", "characters/tide.md"),
            record("element", "tide", "elements/tide.md"),
        ]);
        assert!(dups.is_empty());
    }

    #[test]
    fn test_groups_follow_first_seen_order() {
        let dups = detect_duplicate_ids(vec![
            record("place", "b", "1.md"),
            record("place", "a", "2.md"),
            record("place", "a", "3.md"),
            record("place", "b", "4.md"),
            record("place", "b", "5.md"),
        ]);
        let keys: Vec<_> = dups.iter().map(|d| (d.id.as_str(), d.paths.len())).collect();
        assert_eq!(keys, vec![("b", 3), ("a", 2)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_still_serialize() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let odd = std::path::PathBuf::from(OsStr::from_bytes(b"characters/caf\xe9.md"));
        let dups = detect_duplicate_ids(vec![
            IdentityRecord {
                doc_type: "character".into(),
                id: "kael-nyx".into(),
                path: odd,
            },
            record("character", "kael-nyx", "characters/kael.md"),
        ]);
        let json = serde_json::to_value(&dups).unwrap();
        assert_eq!(json[0]["paths"][0], "characters/caf\u{fffd}.md");
        assert_eq!(json[0]["paths"][1], "characters/kael.md");
    }
}
