//! # Frontmatter Accessor
//!
//! Typed getters over a parsed frontmatter map. Every getter returns either
//! a borrowed Rust value (`&str`, `Vec<&str>`, `CalendarDate`) or the
//! `SchemaReason` describing why the field does not have that shape. No
//! caller past this boundary inspects a raw `serde_json::Value` to decide
//! what a field means.
//!
//! ## Raw Date Lookup
//!
//! Dates are read from the *unparsed* frontmatter text when a
//! `field: value` line exists at the start of a line. A YAML parser is free
//! to coerce `2023-02-30` into some other day; the raw text is what the
//! author wrote, so that is what gets validated. The parsed value is only
//! consulted when no raw line exists.

use lore_core::CalendarDate;
use serde_json::{Map, Value};

use crate::error::SchemaReason;

/// Read-only view of one frontmatter map.
///
/// The same accessor serves top-level documents (with raw text) and nested
/// records such as `persona` or a `stats` entry (without).
#[derive(Debug, Clone, Copy)]
pub struct Frontmatter<'a> {
    fields: &'a Map<String, Value>,
    raw: Option<&'a str>,
}

impl<'a> Frontmatter<'a> {
    /// Accessor over a top-level map and its raw text.
    pub fn new(fields: &'a Map<String, Value>, raw: Option<&'a str>) -> Self {
        Self { fields, raw }
    }

    /// Accessor over a nested record. Raw date lookup is disabled.
    pub fn nested(fields: &'a Map<String, Value>) -> Self {
        Self { fields, raw: None }
    }

    /// Underlying value, if present.
    pub fn value(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field)
    }

    /// Whether the field is absent or explicitly null.
    pub fn is_absent(&self, field: &str) -> bool {
        matches!(self.value(field), None | Some(Value::Null))
    }

    /// Keys of the map, in map order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.fields.keys().map(String::as_str)
    }

    /// A string field.
    ///
    /// `InvalidShape` unless the value is a string.
    pub fn string(&self, field: &str) -> Result<&'a str, SchemaReason> {
        self.value(field)
            .and_then(Value::as_str)
            .ok_or(SchemaReason::InvalidShape)
    }

    /// An optional non-empty string.
    ///
    /// `None` if absent or null; `InvalidShape` if present but not a
    /// non-empty string.
    pub fn optional_string(&self, field: &str) -> Result<Option<&'a str>, SchemaReason> {
        match self.value(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if !s.is_empty() => Ok(Some(s)),
            Some(_) => Err(SchemaReason::InvalidShape),
        }
    }

    /// An array of strings.
    ///
    /// Empty if absent; `InvalidShape` if present but not an array whose
    /// items are all strings.
    pub fn string_array(&self, field: &str) -> Result<Vec<&'a str>, SchemaReason> {
        match self.value(field) {
            None => Ok(Vec::new()),
            Some(value) => as_string_array(value).ok_or(SchemaReason::InvalidShape),
        }
    }

    /// A nested record.
    ///
    /// `None` if absent or null; `InvalidShape` if present but not an
    /// object.
    pub fn record(&self, field: &str) -> Result<Option<Frontmatter<'a>>, SchemaReason> {
        match self.value(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Frontmatter::nested(map))),
            Some(_) => Err(SchemaReason::InvalidShape),
        }
    }

    /// A strict calendar date.
    ///
    /// The raw line wins over the parsed value. With no value anywhere the
    /// result is `Required` when `required`, otherwise `None`. An explicit
    /// null on an optional date counts as absent.
    pub fn date(&self, field: &str, required: bool) -> Result<Option<CalendarDate>, SchemaReason> {
        if !required && matches!(self.value(field), Some(Value::Null)) {
            return Ok(None);
        }
        if let Some(text) = self.raw_line(field) {
            return CalendarDate::parse(text)
                .map(Some)
                .map_err(|_| SchemaReason::InvalidDate);
        }
        match self.value(field) {
            None if required => Err(SchemaReason::Required),
            None | Some(Value::Null) if !required => Ok(None),
            Some(Value::String(s)) => CalendarDate::parse(s)
                .map(Some)
                .map_err(|_| SchemaReason::InvalidDate),
            Some(_) | None => Err(SchemaReason::InvalidDate),
        }
    }

    /// The raw text after `field:` on the first line that starts with it.
    ///
    /// The remainder must be non-empty. It is trimmed, then one leading and
    /// one trailing quote (`'` or `"`) are stripped.
    pub fn raw_line(&self, field: &str) -> Option<&'a str> {
        self.raw?.lines().find_map(|line| {
            let rest = line.strip_prefix(field)?.strip_prefix(':')?;
            if rest.is_empty() {
                return None;
            }
            let value = rest.trim();
            let value = value.strip_prefix(['\'', '"']).unwrap_or(value);
            Some(value.strip_suffix(['\'', '"']).unwrap_or(value))
        })
    }
}

/// View `value` as an array of strings, or `None` if it is anything else.
pub fn as_string_array(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}
