//! # Schema Errors
//!
//! Field-level findings produced by the schema validator. These are data,
//! not Rust errors: a malformed document yields `SchemaError` records in the
//! report and validation carries on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaReason {
    /// Field absent, or not a string where a string is mandatory.
    Required,
    /// Wrong primitive or structure.
    InvalidShape,
    /// Right shape, semantically wrong (empty string, min > max, duplicate).
    InvalidValue,
    /// Not a real calendar date, or dates out of order.
    InvalidDate,
    /// Array of the wrong length.
    InvalidLength,
    /// Reference grammar or reference kind mismatch.
    InvalidReference,
}

impl SchemaReason {
    /// Every reason, in declaration order.
    pub fn all() -> &'static [SchemaReason] {
        &[
            Self::Required,
            Self::InvalidShape,
            Self::InvalidValue,
            Self::InvalidDate,
            Self::InvalidLength,
            Self::InvalidReference,
        ]
    }

    /// Wire name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidShape => "invalid-shape",
            Self::InvalidValue => "invalid-value",
            Self::InvalidDate => "invalid-date",
            Self::InvalidLength => "invalid-length",
            Self::InvalidReference => "invalid-reference",
        }
    }
}

impl fmt::Display for SchemaReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| format!("unknown schema reason: {s:?}"))
    }
}

/// One field-level validation failure on one document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaError {
    /// Declared `type` of the document.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Document id, `None` when the document has no string id.
    pub id: Option<String>,
    /// Offending top-level field.
    pub field: String,
    /// Failure category.
    pub reason: SchemaReason,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: field `{}` is {}",
            self.doc_type,
            self.id.as_deref().unwrap_or("(no id)"),
            self.field,
            self.reason
        )
    }
}
