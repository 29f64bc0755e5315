//! # Cross-Document References
//!
//! Resolution of typed references against the set of ids that exist in the
//! corpus.
//!
//! ## Two Phases
//!
//! 1. [`ReferenceIndex::build`] scans the *entire* document set once and
//!    records, per indexed kind, every id it declares.
//! 2. [`collect_broken_references`] extracts reference candidates from each
//!    document and checks them against that index.
//!
//! References may point forward or backward in file order, so phase 2 can
//! only start once phase 1 has seen every document. The collector takes
//! `&ReferenceIndex` to make that barrier part of its signature.
//!
//! ## Extraction Policy
//!
//! Extraction mirrors the fields the schema validator checks, but never
//! reports shape problems: a value of the wrong shape, or a string outside
//! the reference grammar, is skipped here and left to the validator. A
//! candidate whose kind is not indexed (`space:`, `object:`, `stat:`, ...)
//! is never resolved.

use std::collections::{BTreeMap, HashSet};

use lore_core::{EntityKind, LoreDocument, TypedReference, INDEXED_KINDS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::card::REPRESENTABLE_KINDS;
use crate::validate::RELATED_PREFIX;

/// A reference to an id that no document declares.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BrokenReference {
    /// Declared `type` of the referring document.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Id of the referring document.
    pub id: String,
    /// Field holding the reference.
    pub field: String,
    /// The reference exactly as written.
    pub reference: String,
}

impl std::fmt::Display for BrokenReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: field `{}` references missing `{}`",
            self.doc_type, self.id, self.field, self.reference
        )
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Known ids per indexed entity kind. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    ids: BTreeMap<EntityKind, HashSet<String>>,
}

impl ReferenceIndex {
    /// Build the index from every document in the corpus.
    ///
    /// Documents without an id, or whose kind is not indexed, contribute
    /// nothing.
    pub fn build(docs: &[LoreDocument]) -> Self {
        let mut ids: BTreeMap<EntityKind, HashSet<String>> = INDEXED_KINDS
            .iter()
            .map(|kind| (*kind, HashSet::new()))
            .collect();

        for doc in docs {
            let (Some(kind), Some(id)) = (doc.kind(), doc.id()) else {
                continue;
            };
            if let Some(set) = ids.get_mut(&kind) {
                set.insert(id.to_string());
            }
        }

        Self { ids }
    }

    /// Ids declared for `kind`, or `None` if the kind is not indexed.
    pub fn ids(&self, kind: EntityKind) -> Option<&HashSet<String>> {
        self.ids.get(&kind)
    }

    /// Whether `id` is declared for `kind`. Always `false` for kinds that
    /// are not indexed.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.ids(kind).is_some_and(|set| set.contains(id))
    }

    /// Total number of indexed ids.
    pub fn len(&self) -> usize {
        self.ids.values().map(HashSet::len).sum()
    }

    /// Whether no ids were indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Candidate extraction
// ---------------------------------------------------------------------------

/// A reference found in a document, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCandidate<'a> {
    /// Field the reference came from.
    pub field: &'a str,
    /// The reference as written.
    pub reference: &'a str,
    /// Parsed target.
    pub target: TypedReference,
}

/// Which reference kinds a field keeps.
#[derive(Debug, Clone, Copy)]
enum KindFilter {
    Any,
    Only(&'static [EntityKind]),
    PlaceOrPlanet,
}

impl KindFilter {
    fn allows(self, target: &TypedReference) -> bool {
        match self {
            Self::Any => true,
            Self::Only(kinds) => target.entity_kind().is_some_and(|k| kinds.contains(&k)),
            Self::PlaceOrPlanet => target.is_place_or_planet(),
        }
    }
}

/// Strings of a string-or-array value; other items and shapes are skipped.
fn string_entries(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// A lone string value; anything else yields nothing.
fn single_entry(value: Option<&Value>) -> Vec<&str> {
    value.and_then(Value::as_str).into_iter().collect()
}

/// Strings of an array value; anything else yields nothing.
fn array_entries(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

struct Extractor<'a> {
    doc: &'a LoreDocument,
    candidates: Vec<ReferenceCandidate<'a>>,
}

impl<'a> Extractor<'a> {
    fn push(&mut self, field: &'a str, reference: &'a str, target: TypedReference) {
        self.candidates.push(ReferenceCandidate {
            field,
            reference,
            target,
        });
    }

    /// Location-style entries, parsed with the fixed-prefix grammar.
    fn locations(&mut self, field: &'a str, entries: Vec<&'a str>) {
        for entry in entries {
            if let Some(target) = TypedReference::parse(entry) {
                if KindFilter::PlaceOrPlanet.allows(&target) {
                    self.push(field, entry, target);
                }
            }
        }
    }

    /// Generic `kind:id` entries.
    fn typed(&mut self, field: &'a str, entries: Vec<&'a str>, filter: KindFilter) {
        for entry in entries {
            if let Some(target) = TypedReference::parse_generic(entry) {
                if filter.allows(&target) {
                    self.push(field, entry, target);
                }
            }
        }
    }

    fn who(&mut self) {
        let doc = self.doc;
        for entry in array_values(doc.get("who")) {
            if let Some(character) = entry.get("character").and_then(Value::as_str) {
                self.push("who", character, TypedReference::Character(character.to_string()));
            }
        }
    }

    fn related_characters(&mut self) {
        let doc = self.doc;
        let entries: Vec<&'a str> = array_values(doc.get("related_characters"))
            .iter()
            .filter_map(|entry| entry.get("character").and_then(Value::as_str))
            .collect();
        self.typed(
            "related_characters",
            entries,
            KindFilter::Only(&[EntityKind::Character]),
        );
    }

    fn related_fields(&mut self) {
        let doc = self.doc;
        for (field, value) in doc.fields() {
            if field.starts_with(RELATED_PREFIX) {
                self.typed(field, string_entries(Some(value)), KindFilter::Any);
            }
        }
    }
}

fn array_values(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Extract every reference candidate from one document.
///
/// Documents without an id yield nothing: a broken reference must name the
/// document it came from.
pub fn extract_candidates(doc: &LoreDocument) -> Vec<ReferenceCandidate<'_>> {
    if doc.id().is_none() {
        return Vec::new();
    }
    let mut ex = Extractor {
        doc,
        candidates: Vec::new(),
    };

    if let Some(kind) = doc.kind() {
        match kind {
            EntityKind::Event => {
                ex.who();
                ex.locations("locations", array_entries(doc.get("locations")));
            }
            EntityKind::Character => {
                ex.locations("origin", string_entries(doc.get("origin")));
                ex.typed(
                    "affinity",
                    single_entry(doc.get("affinity")),
                    KindFilter::Only(&[EntityKind::Element]),
                );
                ex.related_characters();
            }
            EntityKind::Element => {
                ex.locations("origin", string_entries(doc.get("origin")));
            }
            EntityKind::Place => {
                ex.locations("planetId", string_entries(doc.get("planetId")));
            }
            EntityKind::Card => {
                ex.typed(
                    "elements",
                    array_entries(doc.get("elements")),
                    KindFilter::Only(&[EntityKind::Element]),
                );
                ex.typed(
                    "represents",
                    array_entries(doc.get("represents")),
                    KindFilter::Only(&REPRESENTABLE_KINDS),
                );
            }
            EntityKind::Object => {
                for field in ["shares_effect_with", "boosts"] {
                    ex.typed(field, array_entries(doc.get(field)), KindFilter::Any);
                }
            }
            EntityKind::Planet | EntityKind::Mechanic | EntityKind::Ability => {}
        }
    }

    ex.related_fields();
    ex.candidates
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve every document's references against a complete index.
///
/// Output follows document order, then extraction order within a document.
pub fn collect_broken_references(
    docs: &[LoreDocument],
    index: &ReferenceIndex,
) -> Vec<BrokenReference> {
    let mut broken = Vec::new();
    for doc in docs {
        let Some(doc_id) = doc.id() else {
            continue;
        };
        for candidate in extract_candidates(doc) {
            let (Some(kind), Some(target_id)) =
                (candidate.target.entity_kind(), candidate.target.id())
            else {
                continue;
            };
            if index.ids(kind).is_none() || index.contains(kind, target_id) {
                continue;
            }
            tracing::debug!(
                path = %doc.source_path().display(),
                field = candidate.field,
                reference = candidate.reference,
                "unresolved reference"
            );
            broken.push(BrokenReference {
                doc_type: doc.doc_type().to_string(),
                id: doc_id.to_string(),
                field: candidate.field.to_string(),
                reference: candidate.reference.to_string(),
            });
        }
    }
    broken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::tests::doc;
    use serde_json::json;

    fn fields(candidates: &[ReferenceCandidate<'_>]) -> Vec<(String, String)> {
        candidates
            .iter()
            .map(|c| (c.field.to_string(), c.reference.to_string()))
            .collect()
    }

    fn pair(field: &str, reference: &str) -> (String, String) {
        (field.to_string(), reference.to_string())
    }

    // ---- index ----

    #[test]
    fn test_index_tracks_indexed_kinds_only() {
        let docs = vec![
            doc(json!({"type": "character", "id": "kael-nyx"})),
            doc(json!({"type": "mechanic", "id": "stagger"})),
            doc(json!({"type": "object", "id": "storm-helm"})),
            doc(json!({"type": "faction", "id": "tide-guild"})),
            doc(json!({"type": "place", "name": "no id"})),
        ];
        let index = ReferenceIndex::build(&docs);
        assert!(index.contains(EntityKind::Character, "kael-nyx"));
        assert!(index.contains(EntityKind::Mechanic, "stagger"));
        assert!(index.ids(EntityKind::Object).is_none());
        assert!(index.ids(EntityKind::Place).unwrap().is_empty());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_index_has_every_indexed_kind() {
        let index = ReferenceIndex::build(&[]);
        assert!(index.is_empty());
        for kind in INDEXED_KINDS {
            assert!(index.ids(kind).is_some(), "{kind}");
        }
    }

    // ---- extraction ----

    #[test]
    fn test_event_candidates() {
        let event = doc(json!({
            "type": "event",
            "id": "fall",
            "who": [{"character": "ghost"}, "bare-string", {"character": 4}],
            "locations": ["place:docks", "space:belt", "unknown", "character:kael", 5],
            "related_cards": "card:ember"
        }));
        assert_eq!(
            fields(&extract_candidates(&event)),
            vec![
                pair("who", "ghost"),
                pair("locations", "place:docks"),
                pair("related_cards", "card:ember"),
            ]
        );
    }

    #[test]
    fn test_character_candidates() {
        let character = doc(json!({
            "type": "character",
            "id": "kael-nyx",
            "origin": "planet:aurora",
            "affinity": "element:tide",
            "related_characters": [
                {"type": "ally", "character": "character:mira"},
                {"type": "rival", "character": "place:docks"}
            ]
        }));
        assert_eq!(
            fields(&extract_candidates(&character)),
            vec![
                pair("origin", "planet:aurora"),
                pair("affinity", "element:tide"),
                pair("related_characters", "character:mira"),
            ]
        );
    }

    #[test]
    fn test_affinity_of_other_kind_is_not_a_candidate() {
        let character = doc(json!({"type": "character", "id": "k", "affinity": "place:docks"}));
        assert!(extract_candidates(&character).is_empty());
    }

    #[test]
    fn test_place_planet_id_string_or_array() {
        let place = doc(json!({"type": "place", "id": "docks", "planetId": ["planet:aurora", "planet:"]}));
        assert_eq!(fields(&extract_candidates(&place)), vec![pair("planetId", "planet:aurora")]);
    }

    #[test]
    fn test_card_candidates_filter_kinds() {
        let card = doc(json!({
            "type": "card",
            "id": "ember-tide",
            "elements": ["element:ember", "place:docks"],
            "represents": ["character:kael", "element:ember", "mechanic:stagger", "event:fall"]
        }));
        assert_eq!(
            fields(&extract_candidates(&card)),
            vec![
                pair("elements", "element:ember"),
                pair("represents", "character:kael"),
                pair("represents", "event:fall"),
            ]
        );
    }

    #[test]
    fn test_document_without_id_yields_nothing() {
        let event = doc(json!({"type": "event", "who": [{"character": "ghost"}]}));
        assert!(extract_candidates(&event).is_empty());
    }

    // ---- resolution ----

    #[test]
    fn test_missing_who_is_broken() {
        let docs = vec![doc(json!({"type": "event", "id": "fall", "who": [{"character": "ghost"}]}))];
        let index = ReferenceIndex::build(&docs);
        assert_eq!(
            collect_broken_references(&docs, &index),
            vec![BrokenReference {
                doc_type: "event".into(),
                id: "fall".into(),
                field: "who".into(),
                reference: "ghost".into(),
            }]
        );
    }

    #[test]
    fn test_forward_references_resolve() {
        let docs = vec![
            doc(json!({"type": "event", "id": "fall", "who": [{"character": "kael-nyx"}], "locations": ["place:docks"]})),
            doc(json!({"type": "character", "id": "kael-nyx", "origin": "place:docks"})),
            doc(json!({"type": "place", "id": "docks"})),
        ];
        let index = ReferenceIndex::build(&docs);
        assert!(collect_broken_references(&docs, &index).is_empty());
    }

    #[test]
    fn test_unindexed_kinds_are_never_broken() {
        let docs = vec![doc(json!({
            "type": "object",
            "id": "storm-helm",
            "shares_effect_with": ["object:missing", "character:missing"],
            "boosts": ["stat:attack", "mechanic:missing"],
            "related_space": "space:nowhere"
        }))];
        let index = ReferenceIndex::build(&docs);
        let broken: Vec<_> = collect_broken_references(&docs, &index)
            .into_iter()
            .map(|b| (b.field, b.reference))
            .collect();
        assert_eq!(
            broken,
            vec![
                pair("shares_effect_with", "character:missing"),
                pair("boosts", "mechanic:missing"),
            ]
        );
    }

    #[test]
    fn test_card_missing_element_is_broken() {
        let docs = vec![
            doc(json!({"type": "card", "id": "ember-tide", "elements": ["element:ember", "element:tide"]})),
            doc(json!({"type": "element", "id": "ember"})),
        ];
        let index = ReferenceIndex::build(&docs);
        let broken = collect_broken_references(&docs, &index);
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].field, "elements");
        assert_eq!(broken[0].reference, "element:tide");
    }
}
