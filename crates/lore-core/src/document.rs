//! # Lore Documents
//!
//! A `LoreDocument` is one content file reduced to what the linter needs:
//! its declared `type`, optional `id`, the parsed frontmatter fields, the raw
//! frontmatter text and the path it came from.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::kind::EntityKind;

/// One parsed content file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoreDocument {
    doc_type: String,
    id: Option<String>,
    fields: Map<String, Value>,
    raw_frontmatter: Option<String>,
    source_path: PathBuf,
}

impl LoreDocument {
    /// Build a document from a parsed frontmatter map.
    ///
    /// Returns `None` when the map has no string `type`: such a file cannot
    /// be routed to any schema and is ignored by every engine. A non-string
    /// `id` is treated as absent.
    pub fn from_fields(
        fields: Map<String, Value>,
        raw_frontmatter: Option<String>,
        source_path: impl Into<PathBuf>,
    ) -> Option<Self> {
        let doc_type = fields.get("type")?.as_str()?.to_string();
        let id = fields.get("id").and_then(Value::as_str).map(str::to_string);
        Some(Self {
            doc_type,
            id,
            fields,
            raw_frontmatter,
            source_path: source_path.into(),
        })
    }

    /// Declared `type` string, exactly as written.
    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    /// The entity kind named by `type`, if it is one.
    pub fn kind(&self) -> Option<EntityKind> {
        self.doc_type.parse().ok()
    }

    /// The string `id`, if present.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All frontmatter fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A single frontmatter field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The unparsed frontmatter block, when the loader kept it.
    pub fn raw_frontmatter(&self) -> Option<&str> {
        self.raw_frontmatter.as_deref()
    }

    /// Path of the source file.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The `(type, id, path)` identity used for duplicate detection.
    ///
    /// Documents without an id have no identity.
    pub fn identity(&self) -> Option<IdentityRecord> {
        Some(IdentityRecord {
            doc_type: self.doc_type.clone(),
            id: self.id.clone()?,
            path: self.source_path.clone(),
        })
    }
}

/// `(type, id)` plus the file that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    /// Declared `type`.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Declared `id`.
    pub id: String,
    /// Source file.
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_requires_string_type() {
        assert!(LoreDocument::from_fields(fields(json!({"id": "a"})), None, "a.md").is_none());
        assert!(
            LoreDocument::from_fields(fields(json!({"type": 3, "id": "a"})), None, "a.md").is_none()
        );
    }

    #[test]
    fn test_non_string_id_is_absent() {
        let doc =
            LoreDocument::from_fields(fields(json!({"type": "place", "id": 7})), None, "p.md")
                .unwrap();
        assert_eq!(doc.id(), None);
        assert!(doc.identity().is_none());
    }

    #[test]
    fn test_kind_and_identity() {
        let doc = LoreDocument::from_fields(
            fields(json!({"type": "character", "id": "kael-nyx", "name": "Kael"})),
            Some("type: character\nid: kael-nyx\nname: Kael".into()),
            "characters/kael.md",
        )
        .unwrap();
        assert_eq!(doc.kind(), Some(EntityKind::Character));
        assert_eq!(doc.get("name"), Some(&json!("Kael")));
        let identity = doc.identity().unwrap();
        assert_eq!(identity.doc_type, "character");
        assert_eq!(identity.id, "kael-nyx");
        assert_eq!(identity.path, PathBuf::from("characters/kael.md"));
    }

    #[test]
    fn test_unrecognized_type_has_no_kind() {
        let doc = LoreDocument::from_fields(fields(json!({"type": "faction", "id": "x"})), None, "f.md")
            .unwrap();
        assert_eq!(doc.kind(), None);
        assert_eq!(doc.doc_type(), "faction");
    }
}
