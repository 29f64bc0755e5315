//! # Schema Validation
//!
//! Per-document validation of lore frontmatter against the rules for its
//! declared kind.
//!
//! ## Invariant
//!
//! Validation never fails. Every problem becomes one `SchemaError` and the
//! remaining checks on the document (and on every other document) still
//! run. A document whose `type` names no `EntityKind` gets no checks.
//!
//! ## Dispatch
//!
//! Each document goes through:
//!
//! 1. the required-field table from [`SchemaRules`];
//! 2. the kind-specific checks, selected by an exhaustive `match` on
//!    `EntityKind` (see [`character`](crate::character),
//!    [`event`](crate::event), [`card`](crate::card),
//!    [`object`](crate::object) and the small kinds below);
//! 3. the free-form `related_*` check for keys the kind does not handle
//!    itself.

use lore_core::{EntityKind, LoreDocument, TypedReference};
use serde_json::Value;

use crate::error::{SchemaError, SchemaReason};
use crate::frontmatter::{as_string_array, Frontmatter};
use crate::rules::SchemaRules;
use crate::{card, character, event, object};

/// Prefix of free-form relation fields.
pub const RELATED_PREFIX: &str = "related_";

/// Validator for lore documents, configured with a rule table.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    rules: SchemaRules,
}

impl SchemaValidator {
    /// Create a validator from explicit rules.
    pub fn new(rules: SchemaRules) -> Self {
        Self { rules }
    }

    /// The rule table in use.
    pub fn rules(&self) -> &SchemaRules {
        &self.rules
    }

    /// Validate one document.
    pub fn validate_document(&self, doc: &LoreDocument) -> Vec<SchemaError> {
        let Some(kind) = doc.kind() else {
            tracing::debug!(
                path = %doc.source_path().display(),
                doc_type = doc.doc_type(),
                "no schema for document type"
            );
            return Vec::new();
        };

        let mut ctx = DocumentCheck::new(doc);
        check_required(&mut ctx, self.rules.required_fields(kind));

        match kind {
            EntityKind::Character => character::check(&mut ctx),
            EntityKind::Place => check_place(&mut ctx),
            EntityKind::Planet => check_image(&mut ctx),
            EntityKind::Element => check_element(&mut ctx),
            EntityKind::Event => event::check(&mut ctx),
            EntityKind::Card => card::check(&mut ctx),
            EntityKind::Mechanic => check_mechanic(&mut ctx),
            EntityKind::Object => object::check(&mut ctx, &self.rules),
            EntityKind::Ability => check_ability(&mut ctx),
        }

        check_related_fields(&mut ctx, kind_related_fields(kind));
        ctx.finish()
    }

    /// Validate every document, concatenating errors in document order.
    pub fn validate_all(&self, docs: &[LoreDocument]) -> Vec<SchemaError> {
        docs.iter()
            .flat_map(|doc| self.validate_document(doc))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Per-document context
// ---------------------------------------------------------------------------

/// Errors collected for one document, plus the accessor over its fields.
pub(crate) struct DocumentCheck<'a> {
    doc_type: &'a str,
    id: Option<&'a str>,
    pub(crate) fm: Frontmatter<'a>,
    errors: Vec<SchemaError>,
}

impl<'a> DocumentCheck<'a> {
    pub(crate) fn new(doc: &'a LoreDocument) -> Self {
        Self {
            doc_type: doc.doc_type(),
            id: doc.id(),
            fm: Frontmatter::new(doc.fields(), doc.raw_frontmatter()),
            errors: Vec::new(),
        }
    }

    /// Record one error against `field`.
    pub(crate) fn push(&mut self, field: &str, reason: SchemaReason) {
        self.errors.push(SchemaError {
            doc_type: self.doc_type.to_string(),
            id: self.id.map(str::to_string),
            field: field.to_string(),
            reason,
        });
    }

    /// Record a failed check and pass a successful one through.
    pub(crate) fn check<T>(&mut self, field: &str, result: Result<T, SchemaReason>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(reason) => {
                self.push(field, reason);
                None
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<SchemaError> {
        self.errors
    }
}

// ---------------------------------------------------------------------------
// Shared field checks
// ---------------------------------------------------------------------------

fn check_required(ctx: &mut DocumentCheck<'_>, fields: &[String]) {
    for field in fields {
        if ctx.fm.value(field).and_then(Value::as_str).is_none() {
            ctx.push(field, SchemaReason::Required);
        }
    }
}

/// Optional `image`: a non-empty string when present.
pub(crate) fn check_image(ctx: &mut DocumentCheck<'_>) {
    let result = match ctx.fm.value("image") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(s)) if s.is_empty() => Err(SchemaReason::InvalidValue),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(SchemaReason::InvalidShape),
    };
    ctx.check("image", result);
}

/// An optional single reference parsed with [`TypedReference::parse`].
///
/// Absent or null is `None`; a non-string is `InvalidShape`; a string
/// outside the grammar is `InvalidReference`.
pub(crate) fn location_reference(
    fm: &Frontmatter<'_>,
    field: &str,
) -> Result<Option<TypedReference>, SchemaReason> {
    match fm.value(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => TypedReference::parse(s)
            .map(Some)
            .ok_or(SchemaReason::InvalidReference),
        Some(_) => Err(SchemaReason::InvalidShape),
    }
}

/// An array of generic `kind:id` references.
///
/// When absent the result is `Required` if `required`, otherwise empty. Not
/// an array, or a non-string item, is `InvalidShape`; an item outside the
/// grammar is `InvalidReference`.
pub(crate) fn typed_ref_array(
    fm: &Frontmatter<'_>,
    field: &str,
    required: bool,
) -> Result<Vec<TypedReference>, SchemaReason> {
    let Some(value) = fm.value(field) else {
        return if required {
            Err(SchemaReason::Required)
        } else {
            Ok(Vec::new())
        };
    };
    as_string_array(value)
        .ok_or(SchemaReason::InvalidShape)?
        .into_iter()
        .map(|entry| TypedReference::parse_generic(entry).ok_or(SchemaReason::InvalidReference))
        .collect()
}

/// `related_*` keys that a kind validates with its own rules.
fn kind_related_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Character => &["related_characters"],
        EntityKind::Mechanic => &["related_elements"],
        EntityKind::Ability => &["related_character"],
        EntityKind::Place
        | EntityKind::Planet
        | EntityKind::Element
        | EntityKind::Event
        | EntityKind::Card
        | EntityKind::Object => &[],
    }
}

/// Free-form `related_*` fields must be a string or an array of strings.
fn check_related_fields(ctx: &mut DocumentCheck<'_>, handled: &[&str]) {
    let offending: Vec<&str> = ctx
        .fm
        .keys()
        .filter(|key| key.starts_with(RELATED_PREFIX) && !handled.iter().any(|h| h == key))
        .filter(|key| match ctx.fm.value(key) {
            Some(Value::String(_)) => false,
            Some(value) => as_string_array(value).is_none(),
            None => false,
        })
        .collect();
    for field in offending {
        ctx.push(field, SchemaReason::InvalidShape);
    }
}

// ---------------------------------------------------------------------------
// Small kinds
// ---------------------------------------------------------------------------

fn check_place(ctx: &mut DocumentCheck<'_>) {
    check_image(ctx);
    let planet = match ctx.fm.value("planetId") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(s)) => match TypedReference::parse(s) {
            Some(TypedReference::Planet(_)) => Ok(()),
            _ => Err(SchemaReason::InvalidReference),
        },
        Some(_) => Err(SchemaReason::InvalidShape),
    };
    ctx.check("planetId", planet);
}

fn check_element(ctx: &mut DocumentCheck<'_>) {
    check_image(ctx);
    let origin = location_reference(&ctx.fm, "origin");
    ctx.check("origin", origin);
}

fn check_mechanic(ctx: &mut DocumentCheck<'_>) {
    let related = typed_ref_array(&ctx.fm, "related_elements", false);
    ctx.check("related_elements", related);
}

fn check_ability(ctx: &mut DocumentCheck<'_>) {
    check_image(ctx);
    if let Ok(value) = ctx.fm.string("related_character") {
        if !matches!(TypedReference::parse(value), Some(TypedReference::Character(_))) {
            ctx.push("related_character", SchemaReason::InvalidReference);
        }
    }
}
