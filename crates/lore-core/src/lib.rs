//! # lore-core — Foundational Types for the Lore Linter
//!
//! This crate defines the primitives every other crate in the workspace
//! builds on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `EntityKind` enum.** One closed definition of the content
//!    kinds (character, place, planet, ...). Every dispatch on a document's
//!    declared `type` goes through an exhaustive `match`, so adding a kind
//!    is a compile-time-checked extension.
//!
//! 2. **One reference grammar.** `TypedReference` owns the `prefix:id`
//!    syntax. Both the schema validator and the reference collector parse
//!    through it; neither re-implements string splitting.
//!
//! 3. **Strict calendar dates.** `CalendarDate` accepts only `YYYY-MM-DD`
//!    strings that name a real day in the proleptic Gregorian calendar.
//!
//! 4. **Documents are immutable snapshots.** A `LoreDocument` is created
//!    once per file from its frontmatter and never mutated.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lore-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod kind;
pub mod reference;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use document::{IdentityRecord, LoreDocument};
pub use error::{LoreError, LoreResult};
pub use frontmatter::{parse_frontmatter, split_frontmatter, yaml_to_json_value, FrontmatterBlock};
pub use kind::{EntityKind, ENTITY_KIND_COUNT, INDEXED_KINDS};
pub use reference::{is_typed_ref, TypedReference, UNKNOWN_SENTINEL};
pub use temporal::{CalendarDate, DateError};
