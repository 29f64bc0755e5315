//! # Entity Kind — Single Source of Truth
//!
//! Defines the `EntityKind` enum with every content kind in a lore corpus.
//! This is the ONE definition used by the schema validator, the reference
//! index and the CLI. Every `match` on `EntityKind` must be exhaustive, so
//! a new kind forces each consumer to decide how to handle it.
//!
//! Documents whose declared `type` does not name a kind are not errors:
//! they parse to `None` and receive no per-kind checks.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// All content kinds in a lore corpus.
///
/// | Kind | Directory | Indexed for references |
/// |------|-----------|------------------------|
/// | Character | `characters/` | yes |
/// | Place | `places/` | yes |
/// | Planet | `planets/` | yes |
/// | Element | `elements/` | yes |
/// | Event | `events/` | yes |
/// | Card | `cards/` | yes |
/// | Mechanic | `mechanics/` | yes |
/// | Object | `objects/` | no |
/// | Ability | `abilities/` | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A person or creature in the setting.
    Character,
    /// A named location on a planet.
    Place,
    /// A world.
    Planet,
    /// An elemental affinity (fire, tide, ...).
    Element,
    /// A dated happening with participants and locations.
    Event,
    /// A collectible card bound to two elements.
    Card,
    /// A game mechanic.
    Mechanic,
    /// An equippable object with stat ranges.
    Object,
    /// A character-bound ability.
    Ability,
}

/// Total number of entity kinds.
pub const ENTITY_KIND_COUNT: usize = 9;

/// Kinds that the reference index tracks. References to any other kind
/// (or to prefixes that are not kinds at all) are never resolved.
pub const INDEXED_KINDS: [EntityKind; 7] = [
    EntityKind::Character,
    EntityKind::Place,
    EntityKind::Planet,
    EntityKind::Element,
    EntityKind::Event,
    EntityKind::Card,
    EntityKind::Mechanic,
];

impl EntityKind {
    /// Returns all entity kinds in canonical order.
    pub fn all() -> &'static [EntityKind] {
        &[
            Self::Character,
            Self::Place,
            Self::Planet,
            Self::Element,
            Self::Event,
            Self::Card,
            Self::Mechanic,
            Self::Object,
            Self::Ability,
        ]
    }

    /// Returns the identifier used in frontmatter `type:` fields and as a
    /// reference prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Place => "place",
            Self::Planet => "planet",
            Self::Element => "element",
            Self::Event => "event",
            Self::Card => "card",
            Self::Mechanic => "mechanic",
            Self::Object => "object",
            Self::Ability => "ability",
        }
    }

    /// Content subdirectory holding documents of this kind.
    pub fn content_dir(&self) -> &'static str {
        match self {
            Self::Character => "characters",
            Self::Place => "places",
            Self::Planet => "planets",
            Self::Element => "elements",
            Self::Event => "events",
            Self::Card => "cards",
            Self::Mechanic => "mechanics",
            Self::Object => "objects",
            Self::Ability => "abilities",
        }
    }

    /// Whether references of this kind are resolved against the index.
    pub fn is_indexed(&self) -> bool {
        match self {
            Self::Character
            | Self::Place
            | Self::Planet
            | Self::Element
            | Self::Event
            | Self::Card
            | Self::Mechanic => true,
            Self::Object | Self::Ability => false,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name an entity kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    /// Parse an entity kind from its frontmatter identifier (case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(Self::Character),
            "place" => Ok(Self::Place),
            "planet" => Ok(Self::Planet),
            "element" => Ok(Self::Element),
            "event" => Ok(Self::Event),
            "card" => Ok(Self::Card),
            "mechanic" => Ok(Self::Mechanic),
            "object" => Ok(Self::Object),
            "ability" => Ok(Self::Ability),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
