//! # Character Validation
//!
//! Characters carry the richest frontmatter in a corpus: lifetime dates,
//! elemental affinity, an origin reference, typed relations to other
//! characters, and six optional nested blocks describing how the character
//! thinks and behaves.
//!
//! ## Nested Blocks
//!
//! `persona`, `knowledge`, `goals`, `capabilities`, `memory_profile` and
//! `emotions_profile` are each optional. A present block must be a mapping
//! whose sub-fields have the documented shapes. The first violation inside
//! a block rejects the whole block with a single `invalid-shape` error on
//! the block's field; the offending sub-path is logged at debug level.
//!
//! Blocks parse into the typed values below, so consumers that need the
//! data get it without re-checking shapes.

use std::collections::HashSet;

use lore_core::TypedReference;
use serde_json::Value;
use thiserror::Error;

use crate::error::SchemaReason;
use crate::frontmatter::Frontmatter;
use crate::validate::{check_image, location_reference, DocumentCheck};

/// Where inside a nested block validation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{path}` is {reason}")]
pub struct BlockViolation {
    /// Sub-path inside the block, e.g. `voice.tone` or `actions[1].triggers`.
    pub path: String,
    /// What was wrong at that path.
    pub reason: SchemaReason,
}

/// Attach a block sub-path to an accessor failure.
trait AtPath<T> {
    fn at(self, path: impl Into<String>) -> Result<T, BlockViolation>;
}

impl<T> AtPath<T> for Result<T, SchemaReason> {
    fn at(self, path: impl Into<String>) -> Result<T, BlockViolation> {
        self.map_err(|reason| BlockViolation {
            path: path.into(),
            reason,
        })
    }
}

fn violation(path: impl Into<String>) -> BlockViolation {
    BlockViolation {
        path: path.into(),
        reason: SchemaReason::InvalidShape,
    }
}

// ---------------------------------------------------------------------------
// Typed block values
// ---------------------------------------------------------------------------

/// `persona` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Persona<'a> {
    pub archetype: Option<&'a str>,
    pub traits: Vec<&'a str>,
    pub values: Vec<&'a str>,
    pub taboos: Vec<&'a str>,
    pub biography_highlights: Vec<&'a str>,
    pub voice: Option<Voice<'a>>,
}

/// `persona.voice`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Voice<'a> {
    pub tone: Option<&'a str>,
    pub style_notes: Vec<&'a str>,
}

/// `knowledge` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Knowledge<'a> {
    pub summary: Option<&'a str>,
    pub knows_about: Vec<&'a str>,
    pub blindspots: Vec<&'a str>,
    pub can_reveal: Vec<&'a str>,
}

/// `goals` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Goals<'a> {
    pub long_term: Vec<&'a str>,
    pub typical_priorities: Vec<&'a str>,
}

/// `capabilities` block. Always holds at least one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities<'a> {
    pub actions: Vec<CapabilityAction<'a>>,
}

/// One entry of `capabilities.actions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityAction<'a> {
    pub action: &'a str,
    pub triggers: Vec<&'a str>,
    pub notes: Vec<&'a str>,
    pub filters: Vec<&'a str>,
}

/// `memory_profile` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryProfile<'a> {
    pub summary: Option<&'a str>,
    pub retention: Option<&'a str>,
    pub remembers: Vec<&'a str>,
    pub forgets: Vec<&'a str>,
}

/// `emotions_profile` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmotionsProfile<'a> {
    pub baseline: Option<&'a str>,
    pub range: Vec<&'a str>,
    pub triggers: Vec<&'a str>,
    pub soothers: Vec<&'a str>,
}

/// One entry of `related_characters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedCharacter<'a> {
    /// Relation label (`ally`, `rival`, ...).
    pub relation: &'a str,
    /// Id of the related character.
    pub character_id: String,
}

// ---------------------------------------------------------------------------
// Block parsers
// ---------------------------------------------------------------------------

pub fn parse_persona(block: Frontmatter<'_>) -> Result<Persona<'_>, BlockViolation> {
    let voice = match block.record("voice").at("voice")? {
        Some(voice) => Some(Voice {
            tone: voice.optional_string("tone").at("voice.tone")?,
            style_notes: voice.string_array("style_notes").at("voice.style_notes")?,
        }),
        None => None,
    };
    Ok(Persona {
        archetype: block.optional_string("archetype").at("archetype")?,
        traits: block.string_array("traits").at("traits")?,
        values: block.string_array("values").at("values")?,
        taboos: block.string_array("taboos").at("taboos")?,
        biography_highlights: block
            .string_array("biography_highlights")
            .at("biography_highlights")?,
        voice,
    })
}

pub fn parse_knowledge(block: Frontmatter<'_>) -> Result<Knowledge<'_>, BlockViolation> {
    Ok(Knowledge {
        summary: block.optional_string("summary").at("summary")?,
        knows_about: block.string_array("knows_about").at("knows_about")?,
        blindspots: block.string_array("blindspots").at("blindspots")?,
        can_reveal: block.string_array("can_reveal").at("can_reveal")?,
    })
}

pub fn parse_goals(block: Frontmatter<'_>) -> Result<Goals<'_>, BlockViolation> {
    Ok(Goals {
        long_term: block.string_array("long_term").at("long_term")?,
        typical_priorities: block
            .string_array("typical_priorities")
            .at("typical_priorities")?,
    })
}

/// Parse `capabilities`. `actions` must be a non-empty array; each action
/// needs a non-empty `action` and at least one trigger.
pub fn parse_capabilities(block: Frontmatter<'_>) -> Result<Capabilities<'_>, BlockViolation> {
    let entries = block
        .value("actions")
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| violation("actions"))?;

    let actions = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let action = entry
                .as_object()
                .map(Frontmatter::nested)
                .ok_or_else(|| violation(format!("actions[{i}]")))?;
            let name = action
                .optional_string("action")
                .at(format!("actions[{i}].action"))?
                .ok_or_else(|| violation(format!("actions[{i}].action")))?;
            let triggers = action
                .string_array("triggers")
                .at(format!("actions[{i}].triggers"))?;
            if triggers.is_empty() {
                return Err(violation(format!("actions[{i}].triggers")));
            }
            Ok(CapabilityAction {
                action: name,
                triggers,
                notes: action.string_array("notes").at(format!("actions[{i}].notes"))?,
                filters: action
                    .string_array("filters")
                    .at(format!("actions[{i}].filters"))?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Capabilities { actions })
}

pub fn parse_memory_profile(block: Frontmatter<'_>) -> Result<MemoryProfile<'_>, BlockViolation> {
    Ok(MemoryProfile {
        summary: block.optional_string("summary").at("summary")?,
        retention: block.optional_string("retention").at("retention")?,
        remembers: block.string_array("remembers").at("remembers")?,
        forgets: block.string_array("forgets").at("forgets")?,
    })
}

pub fn parse_emotions_profile(
    block: Frontmatter<'_>,
) -> Result<EmotionsProfile<'_>, BlockViolation> {
    Ok(EmotionsProfile {
        baseline: block.optional_string("baseline").at("baseline")?,
        range: block.string_array("range").at("range")?,
        triggers: block.string_array("triggers").at("triggers")?,
        soothers: block.string_array("soothers").at("soothers")?,
    })
}

/// Parse `related_characters`.
///
/// Each entry must be a mapping with a non-empty `type` and a
/// `character:<id>` reference; a character may appear only once.
pub fn parse_related_characters<'a>(
    fm: &Frontmatter<'a>,
) -> Result<Vec<RelatedCharacter<'a>>, SchemaReason> {
    let Some(value) = fm.value("related_characters").filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    let entries = value.as_array().ok_or(SchemaReason::InvalidShape)?;

    let mut seen = HashSet::new();
    let mut related = Vec::with_capacity(entries.len());
    for entry in entries {
        let record = entry
            .as_object()
            .map(Frontmatter::nested)
            .ok_or(SchemaReason::InvalidShape)?;
        let relation = record
            .optional_string("type")?
            .ok_or(SchemaReason::InvalidShape)?;
        let Some(TypedReference::Character(character_id)) =
            TypedReference::parse(record.string("character")?)
        else {
            return Err(SchemaReason::InvalidReference);
        };
        if !seen.insert(character_id.clone()) {
            return Err(SchemaReason::InvalidValue);
        }
        related.push(RelatedCharacter {
            relation,
            character_id,
        });
    }
    Ok(related)
}

// ---------------------------------------------------------------------------
// Document check
// ---------------------------------------------------------------------------

pub(crate) fn check(ctx: &mut DocumentCheck<'_>) {
    check_image(ctx);
    check_lifetime(ctx);

    let affinity = match ctx.fm.value("affinity") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(s)) => match TypedReference::parse(s) {
            Some(TypedReference::Element(_)) => Ok(()),
            _ => Err(SchemaReason::InvalidReference),
        },
        Some(_) => Err(SchemaReason::InvalidShape),
    };
    ctx.check("affinity", affinity);

    let origin = location_reference(&ctx.fm, "origin");
    ctx.check("origin", origin);

    let related = parse_related_characters(&ctx.fm);
    ctx.check("related_characters", related);

    check_block(ctx, "persona", parse_persona);
    check_block(ctx, "knowledge", parse_knowledge);
    check_block(ctx, "goals", parse_goals);
    check_block(ctx, "capabilities", parse_capabilities);
    check_block(ctx, "memory_profile", parse_memory_profile);
    check_block(ctx, "emotions_profile", parse_emotions_profile);
}

/// `born` and `died` are optional dates; a death before birth is an
/// `invalid-date` on `died`.
fn check_lifetime(ctx: &mut DocumentCheck<'_>) {
    let born = ctx.fm.date("born", false);
    let born = ctx.check("born", born).flatten();
    let died = ctx.fm.date("died", false);
    let died = ctx.check("died", died).flatten();

    if let (Some(born), Some(died)) = (born, died) {
        if died < born {
            ctx.push("died", SchemaReason::InvalidDate);
        }
    }
}

fn check_block<'a, T>(
    ctx: &mut DocumentCheck<'a>,
    field: &str,
    parse: impl FnOnce(Frontmatter<'a>) -> Result<T, BlockViolation>,
) {
    let block = match ctx.fm.record(field) {
        Ok(Some(block)) => block,
        Ok(None) => return,
        Err(reason) => {
            ctx.push(field, reason);
            return;
        }
    };
    if let Err(violation) = parse(block) {
        tracing::debug!(block = field, %violation, "rejected character block");
        ctx.push(field, SchemaReason::InvalidShape);
    }
}
