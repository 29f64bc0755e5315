//! # Lint Report
//!
//! The report aggregates the three independent engines over one corpus:
//! duplicate ids, broken references and schema errors. The lists are not
//! cross-checked against each other.
//!
//! [`lint`] is the whole pipeline. It builds the reference index from the
//! complete document set before any reference is resolved.

use lore_core::LoreDocument;
use serde::{Deserialize, Serialize};

use crate::duplicates::{detect_duplicate_ids, DuplicateId};
use crate::error::SchemaError;
use crate::references::{collect_broken_references, BrokenReference, ReferenceIndex};
use crate::validate::SchemaValidator;

/// Findings for one corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    pub duplicate_ids: Vec<DuplicateId>,
    pub broken_references: Vec<BrokenReference>,
    pub schema_errors: Vec<SchemaError>,
}

impl LintReport {
    /// Total findings across all three lists.
    pub fn error_count(&self) -> usize {
        self.duplicate_ids.len() + self.broken_references.len() + self.schema_errors.len()
    }

    /// `true` when every list is empty.
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

/// Lint a complete document set.
pub fn lint(docs: &[LoreDocument], validator: &SchemaValidator) -> LintReport {
    let index = ReferenceIndex::build(docs);
    tracing::info!(documents = docs.len(), indexed_ids = index.len(), "built reference index");

    let broken_references = collect_broken_references(docs, &index);
    let schema_errors = validator.validate_all(docs);
    let duplicate_ids = detect_duplicate_ids(docs.iter().filter_map(LoreDocument::identity));

    let report = LintReport {
        duplicate_ids,
        broken_references,
        schema_errors,
    };
    tracing::info!(
        duplicate_ids = report.duplicate_ids.len(),
        broken_references = report.broken_references.len(),
        schema_errors = report.schema_errors.len(),
        "lint complete"
    );
    report
}
