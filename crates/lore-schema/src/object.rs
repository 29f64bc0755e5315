//! # Object Validation
//!
//! Equippable objects: a slot from the configured slot set, optional stat
//! ranges, and two reference lists (`shares_effect_with`, `boosts`) that
//! must always be present.
//!
//! ## Stats
//!
//! `stats` is a mapping of stat name to `{ min, max }`. It may be left out,
//! but an explicit `null` (a bare `stats:` line) is `invalid-shape`. Known
//! stats are `attack`, `defense`, `cdr` and `max_hp`; other keys are
//! ignored. An empty mapping is `invalid-value`. A known stat without two finite numbers is
//! `invalid-shape`, and `min > max` is `invalid-value`. The first problem in
//! stat-name order is the one reported.

use lore_core::TypedReference;
use serde_json::Value;

use crate::error::SchemaReason;
use crate::frontmatter::Frontmatter;
use crate::rules::SchemaRules;
use crate::validate::{typed_ref_array, DocumentCheck};

/// Stat names with range validation, in reporting order.
pub const STAT_NAMES: [&str; 4] = ["attack", "defense", "cdr", "max_hp"];

/// Inclusive numeric range for one stat. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatRange {
    pub min: f64,
    pub max: f64,
}

impl StatRange {
    /// Parse a `{ min, max }` mapping.
    pub fn parse(value: &Value) -> Result<Self, SchemaReason> {
        let bound = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_f64)
                .filter(|n| n.is_finite())
                .ok_or(SchemaReason::InvalidShape)
        };
        let (min, max) = (bound("min")?, bound("max")?);
        if min > max {
            return Err(SchemaReason::InvalidValue);
        }
        Ok(Self { min, max })
    }
}

/// Parsed `stats` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectStats {
    pub attack: Option<StatRange>,
    pub defense: Option<StatRange>,
    pub cdr: Option<StatRange>,
    pub max_hp: Option<StatRange>,
}

/// Parse the optional `stats` field.
///
/// Only a missing key counts as absent; `stats: null` is `InvalidShape`.
pub fn parse_stats(fm: &Frontmatter<'_>) -> Result<Option<ObjectStats>, SchemaReason> {
    let stats = match fm.value("stats") {
        None => return Ok(None),
        Some(Value::Object(map)) => Frontmatter::nested(map),
        Some(_) => return Err(SchemaReason::InvalidShape),
    };
    if stats.keys().next().is_none() {
        return Err(SchemaReason::InvalidValue);
    }

    let mut ranges = [None; STAT_NAMES.len()];
    for (slot, name) in ranges.iter_mut().zip(STAT_NAMES) {
        *slot = stats.value(name).map(StatRange::parse).transpose()?;
    }
    let [attack, defense, cdr, max_hp] = ranges;
    Ok(Some(ObjectStats {
        attack,
        defense,
        cdr,
        max_hp,
    }))
}

/// References an object shares its effect with, or boosts.
pub fn parse_object_refs(
    fm: &Frontmatter<'_>,
    field: &str,
) -> Result<Vec<TypedReference>, SchemaReason> {
    typed_ref_array(fm, field, true)
}

pub(crate) fn check(ctx: &mut DocumentCheck<'_>, rules: &SchemaRules) {
    if let Ok(slot) = ctx.fm.string("slot") {
        if !rules.is_object_slot(slot) {
            ctx.push("slot", SchemaReason::InvalidValue);
        }
    }

    let stats = parse_stats(&ctx.fm);
    ctx.check("stats", stats);

    for field in ["shares_effect_with", "boosts"] {
        let refs = parse_object_refs(&ctx.fm, field);
        ctx.check(field, refs);
    }
}
