//! # Schema Rules
//!
//! The configurable half of schema validation: which top-level fields each
//! kind requires, and which object slots exist. Rules are plain data passed
//! into [`SchemaValidator::new`](crate::SchemaValidator::new), never global
//! state, so a test or a `--rules` file can substitute its own table.
//!
//! ## Rules File Format
//!
//! ```yaml
//! required:
//!   character: [id, name]
//!   mechanic: [id, name]
//! object_slots: [helmet, shoulders, gloves, pants, boots]
//! ```
//!
//! Kinds missing from `required` have no required fields. A missing
//! `object_slots` keeps the default slot set.

use std::collections::BTreeMap;
use std::path::Path;

use lore_core::{EntityKind, LoreError, LoreResult};
use serde::{Deserialize, Serialize};

/// Equipment slots an object may occupy by default.
pub const DEFAULT_OBJECT_SLOTS: [&str; 5] = ["helmet", "shoulders", "gloves", "pants", "boots"];

/// Required-field table plus the object slot set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRules {
    /// Fields that must hold a string, per kind.
    #[serde(default)]
    pub required: BTreeMap<EntityKind, Vec<String>>,
    /// Allowed values of an object's `slot`.
    #[serde(default = "default_object_slots")]
    pub object_slots: Vec<String>,
}

fn default_object_slots() -> Vec<String> {
    DEFAULT_OBJECT_SLOTS.iter().map(|s| s.to_string()).collect()
}

impl Default for SchemaRules {
    fn default() -> Self {
        let table: [(EntityKind, &[&str]); 9] = [
            (EntityKind::Character, &["id", "name"]),
            (EntityKind::Place, &["id", "name"]),
            (EntityKind::Planet, &["id", "name"]),
            (EntityKind::Element, &["id", "name"]),
            (EntityKind::Event, &["id", "title"]),
            (EntityKind::Card, &["id", "name"]),
            (EntityKind::Mechanic, &["id", "name", "difficulty"]),
            (
                EntityKind::Object,
                &["id", "name", "rarity", "slot", "effect_description"],
            ),
            (EntityKind::Ability, &["id", "name", "related_character"]),
        ];
        let required = table
            .into_iter()
            .map(|(kind, fields)| (kind, fields.iter().map(|f| f.to_string()).collect()))
            .collect();
        Self {
            required,
            object_slots: default_object_slots(),
        }
    }
}

impl SchemaRules {
    /// Parse rules from YAML text.
    pub fn from_yaml_str(text: &str) -> LoreResult<Self> {
        serde_yaml::from_str(text).map_err(|e| LoreError::RulesParse(e.to_string()))
    }

    /// Load rules from a YAML file.
    pub fn load(path: &Path) -> LoreResult<Self> {
        if !path.exists() {
            return Err(LoreError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&text)
            .map_err(|e| LoreError::RulesParse(format!("{}: {e}", path.display())))
    }

    /// Required fields for `kind`, empty if the table has no entry.
    pub fn required_fields(&self, kind: EntityKind) -> &[String] {
        self.required.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `slot` is an allowed object slot.
    pub fn is_object_slot(&self, slot: &str) -> bool {
        self.object_slots.iter().any(|s| s == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_covers_every_kind() {
        let rules = SchemaRules::default();
        for kind in EntityKind::all() {
            assert!(
                rules.required_fields(*kind).iter().any(|f| f == "id"),
                "{kind} should require id"
            );
        }
        assert_eq!(
            rules.required_fields(EntityKind::Event),
            &["id".to_string(), "title".to_string()]
        );
        assert!(rules
            .required_fields(EntityKind::Mechanic)
            .contains(&"difficulty".to_string()));
    }

    #[test]
    fn test_default_slots() {
        let rules = SchemaRules::default();
        assert!(rules.is_object_slot("helmet"));
        assert!(rules.is_object_slot("boots"));
        assert!(!rules.is_object_slot("ring"));
    }

    #[test]
    fn test_override_from_yaml() {
        let rules = SchemaRules::from_yaml_str("required:\n  mechanic: [id, name]\n").unwrap();
        assert_eq!(rules.required_fields(EntityKind::Mechanic).len(), 2);
        assert!(rules.required_fields(EntityKind::Character).is_empty());
        assert!(rules.is_object_slot("pants"));
    }

    #[test]
    fn test_unknown_kind_in_rules_is_rejected() {
        let err = SchemaRules::from_yaml_str("required:\n  faction: [id]\n").unwrap_err();
        assert!(matches!(err, LoreError::RulesParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "object_slots: [ring]").unwrap();
        let rules = SchemaRules::load(file.path()).unwrap();
        assert!(rules.is_object_slot("ring"));
        assert!(!rules.is_object_slot("helmet"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaRules::load(&dir.path().join("rules.yaml")).unwrap_err();
        assert!(matches!(err, LoreError::FileNotFound { .. }));
    }
}
