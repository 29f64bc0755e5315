//! # Frontmatter Splitting and Conversion
//!
//! Content files open with a YAML block between two `---` lines. This module
//! splits that block from the body, parses it with `serde_yaml`, and converts
//! the result into a `serde_json::Value` tree so the rest of the workspace
//! works over one value type.
//!
//! Everything here is pure and operates on in-memory text; reading files is
//! the loader's job.

use std::path::Path;

use serde_json::Value;

use crate::document::LoreDocument;
use crate::error::{LoreError, LoreResult};

/// A frontmatter block split from its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    /// Text between the delimiters, lines joined with `\n`.
    pub raw: String,
    /// Everything after the closing delimiter.
    pub body: &'a str,
}

/// Split a frontmatter block off the start of `text`.
///
/// The first line must be `---` (a leading BOM is allowed). The block runs
/// until the next line that is exactly `---` or `...` after trimming
/// trailing whitespace. Returns `None` when there is no opening delimiter or
/// the block is never closed.
pub fn split_frontmatter(text: &str) -> Option<FrontmatterBlock<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }
    offset += first.len();

    let mut raw_lines: Vec<&str> = Vec::new();
    for line in lines {
        offset += line.len();
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some(FrontmatterBlock {
                raw: raw_lines.join("\n"),
                body: &text[offset..],
            });
        }
        raw_lines.push(line.trim_end_matches(['\n', '\r']));
    }
    None
}

/// Parse a file's text into a `LoreDocument`.
///
/// Returns `Ok(None)` when the file has no frontmatter, when the
/// frontmatter is not a mapping, or when it has no string `type`.
///
/// # Errors
///
/// [`LoreError::YamlParse`] when the block is not valid YAML, and
/// [`LoreError::UnsupportedYaml`] when it uses a mapping key that has no
/// string form.
pub fn parse_frontmatter(text: &str, path: &Path) -> LoreResult<Option<LoreDocument>> {
    let Some(block) = split_frontmatter(text) else {
        return Ok(None);
    };

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&block.raw).map_err(|source| LoreError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?;
    let json = yaml_to_json_value(&yaml).map_err(|message| LoreError::UnsupportedYaml {
        path: path.to_path_buf(),
        message,
    })?;

    match json {
        Value::Object(fields) => Ok(LoreDocument::from_fields(fields, Some(block.raw), path)),
        _ => Ok(None),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar mapping keys are stringified. Floats JSON cannot represent
/// (`.nan`, `.inf`) become `null`, so numeric checks downstream see a
/// non-number. Tags are dropped and their inner value converted.
///
/// # Errors
///
/// Returns a message when a mapping key is a sequence or mapping.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else {
                Ok(n
                    .as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    serde_yaml::Value::Tagged(tagged) => match yaml_to_json_value(&tagged.value)? {
                        Value::String(s) => s,
                        other => other.to_string(),
                    },
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
