//! # Error Types — Structured Error Hierarchy
//!
//! Operational errors for the lore linter. These cover the boundary around
//! the core (reading files, parsing YAML, loading rule overrides). Problems
//! with document *content* are never errors: they are collected into the
//! lint report as schema errors, broken references and duplicate ids.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the lore linter.
#[derive(Error, Debug)]
pub enum LoreError {
    /// A required file or directory was not found.
    #[error("required path not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Frontmatter YAML could not be parsed.
    #[error("failed to parse YAML frontmatter at {path}: {source}")]
    YamlParse {
        /// Source file of the frontmatter block.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// Frontmatter parsed as YAML but used a construct with no JSON form.
    #[error("unsupported YAML in frontmatter at {path}: {message}")]
    UnsupportedYaml {
        /// Source file of the frontmatter block.
        path: PathBuf,
        /// What could not be converted.
        message: String,
    },

    /// A schema rules file could not be parsed.
    #[error("invalid schema rules: {0}")]
    RulesParse(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the workspace.
pub type LoreResult<T> = Result<T, LoreError>;
