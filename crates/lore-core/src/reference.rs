//! # Typed References
//!
//! Frontmatter fields point at other documents with strings of the form
//! `prefix:id` (`place:haven-docks`, `element:tide`) or the sentinel
//! `unknown`. `TypedReference` is the single parser for that grammar.
//!
//! ## Grammar
//!
//! A reference is valid only if it contains exactly one `:` separator with
//! non-empty text on both sides, or equals the sentinel `unknown`.
//!
//! Two entry points exist because fields differ in how they constrain the
//! prefix:
//!
//! - [`TypedReference::parse`] accepts the sentinel and the fixed location
//!   and actor prefixes (`place`, `planet`, `space`, `character`,
//!   `element`). Used by `origin`, `locations` and `planetId`.
//! - [`TypedReference::parse_generic`] accepts any prefix. Used where the
//!   kind is decided by context (`boosts`, `shares_effect_with`,
//!   `related_*`, card `represents`).

use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;

/// Sentinel for "origin or location not known".
pub const UNKNOWN_SENTINEL: &str = "unknown";

/// A parsed reference to another document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TypedReference {
    /// `place:<id>`
    Place(String),
    /// `planet:<id>`
    Planet(String),
    /// `space:<id>`. Never resolved against the index.
    Space(String),
    /// `character:<id>`
    Character(String),
    /// `element:<id>`
    Element(String),
    /// The `unknown` sentinel.
    Unknown,
    /// Any other `kind:id` pair accepted by the generic grammar.
    Other {
        /// Prefix before the separator.
        kind: String,
        /// Text after the separator.
        id: String,
    },
}

/// Split `value` into `(prefix, id)` when it has exactly one separator and
/// both halves are non-empty.
fn split_reference(value: &str) -> Option<(&str, &str)> {
    let (prefix, id) = value.split_once(':')?;
    if prefix.is_empty() || id.is_empty() || id.contains(':') {
        return None;
    }
    Some((prefix, id))
}

impl TypedReference {
    /// Parse a location/actor reference.
    ///
    /// Returns `None` for an empty suffix (`place:`), a missing separator
    /// (`placeid`), more than one separator, or a prefix outside the fixed
    /// set.
    pub fn parse(value: &str) -> Option<Self> {
        if value == UNKNOWN_SENTINEL {
            return Some(Self::Unknown);
        }
        let (prefix, id) = split_reference(value)?;
        Self::from_fixed_prefix(prefix, id)
    }

    /// Parse any `kind:id` pair.
    ///
    /// Fixed prefixes map to their dedicated variants; everything else is
    /// `Other`. The `unknown` sentinel is not a generic reference.
    pub fn parse_generic(value: &str) -> Option<Self> {
        let (prefix, id) = split_reference(value)?;
        Some(Self::from_fixed_prefix(prefix, id).unwrap_or_else(|| Self::Other {
            kind: prefix.to_string(),
            id: id.to_string(),
        }))
    }

    fn from_fixed_prefix(prefix: &str, id: &str) -> Option<Self> {
        let id = id.to_string();
        match prefix {
            "place" => Some(Self::Place(id)),
            "planet" => Some(Self::Planet(id)),
            "space" => Some(Self::Space(id)),
            "character" => Some(Self::Character(id)),
            "element" => Some(Self::Element(id)),
            _ => None,
        }
    }

    /// The reference prefix (`"unknown"` for the sentinel).
    pub fn kind_str(&self) -> &str {
        match self {
            Self::Place(_) => "place",
            Self::Planet(_) => "planet",
            Self::Space(_) => "space",
            Self::Character(_) => "character",
            Self::Element(_) => "element",
            Self::Unknown => UNKNOWN_SENTINEL,
            Self::Other { kind, .. } => kind,
        }
    }

    /// The referenced id, absent for the sentinel.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Place(id)
            | Self::Planet(id)
            | Self::Space(id)
            | Self::Character(id)
            | Self::Element(id) => Some(id),
            Self::Other { id, .. } => Some(id),
            Self::Unknown => None,
        }
    }

    /// The entity kind this reference targets, if the prefix names one.
    ///
    /// `space:` and the sentinel never target a kind.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Place(_) => Some(EntityKind::Place),
            Self::Planet(_) => Some(EntityKind::Planet),
            Self::Character(_) => Some(EntityKind::Character),
            Self::Element(_) => Some(EntityKind::Element),
            Self::Space(_) | Self::Unknown => None,
            Self::Other { kind, .. } => kind.parse().ok(),
        }
    }

    /// `true` for `place:` and `planet:` references.
    pub fn is_place_or_planet(&self) -> bool {
        matches!(self, Self::Place(_) | Self::Planet(_))
    }
}

impl std::fmt::Display for TypedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{}:{id}", self.kind_str()),
            None => f.write_str(UNKNOWN_SENTINEL),
        }
    }
}

/// Whether `value` satisfies the generic `kind:id` grammar.
pub fn is_typed_ref(value: &str) -> bool {
    split_reference(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_prefixes() {
        assert_eq!(
            TypedReference::parse("place:haven-docks"),
            Some(TypedReference::Place("haven-docks".into()))
        );
        assert_eq!(
            TypedReference::parse("planet:aurora"),
            Some(TypedReference::Planet("aurora".into()))
        );
        assert_eq!(
            TypedReference::parse("space:void"),
            Some(TypedReference::Space("void".into()))
        );
        assert_eq!(
            TypedReference::parse("character:kael-nyx"),
            Some(TypedReference::Character("kael-nyx".into()))
        );
        assert_eq!(
            TypedReference::parse("element:tide"),
            Some(TypedReference::Element("tide".into()))
        );
    }

    #[test]
    fn parses_unknown_sentinel() {
        assert_eq!(TypedReference::parse("unknown"), Some(TypedReference::Unknown));
        assert_eq!(TypedReference::Unknown.id(), None);
    }

    #[test]
    fn rejects_empty_suffix_and_missing_separator() {
        assert_eq!(TypedReference::parse("place:"), None);
        assert_eq!(TypedReference::parse("placeid"), None);
        assert_eq!(TypedReference::parse_generic("place:"), None);
        assert_eq!(TypedReference::parse_generic("placeid"), None);
    }

    #[test]
    fn rejects_multiple_separators() {
        assert_eq!(TypedReference::parse("place:a:b"), None);
        assert!(!is_typed_ref("character:a:b"));
    }

    #[test]
    fn fixed_parser_rejects_other_prefixes() {
        assert_eq!(TypedReference::parse("event:fall-of-night"), None);
        assert_eq!(TypedReference::parse("Unknown"), None);
    }

    #[test]
    fn generic_parser_accepts_any_prefix() {
        let parsed = TypedReference::parse_generic("mechanic:stagger").unwrap();
        assert_eq!(parsed.kind_str(), "mechanic");
        assert_eq!(parsed.id(), Some("stagger"));
        assert_eq!(parsed.entity_kind(), Some(EntityKind::Mechanic));

        let parsed = TypedReference::parse_generic("stat:attack").unwrap();
        assert_eq!(parsed.entity_kind(), None);
    }

    #[test]
    fn generic_parser_rejects_sentinel_and_empty_prefix() {
        assert_eq!(TypedReference::parse_generic("unknown"), None);
        assert_eq!(TypedReference::parse_generic(":id"), None);
    }

    #[test]
    fn space_is_not_an_entity_kind() {
        let space = TypedReference::parse("space:belt").unwrap();
        assert_eq!(space.entity_kind(), None);
        assert!(!space.is_place_or_planet());
    }

    #[test]
    fn display_reproduces_source_string() {
        for source in ["place:haven-docks", "unknown", "planet:aurora"] {
            assert_eq!(TypedReference::parse(source).unwrap().to_string(), source);
        }
        assert_eq!(
            TypedReference::parse_generic("card:ember").unwrap().to_string(),
            "card:ember"
        );
    }
}
