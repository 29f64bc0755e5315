//! # lore-schema — Lint Engines for Lore Content
//!
//! Validates a set of [`LoreDocument`](lore_core::LoreDocument)s and
//! collects every problem into a [`LintReport`]. Nothing in this crate
//! reads files or fails on malformed content.
//!
//! ## Engines
//!
//! - **Schema validation** ([`validate`]): required fields from
//!   [`SchemaRules`], then kind-specific checks for dates, typed
//!   references, nested character blocks, object stats and card elements.
//! - **Reference resolution** ([`references`]): a [`ReferenceIndex`] of
//!   every declared id, built first, then a pass that reports references to
//!   ids nobody declares.
//! - **Duplicate detection** ([`duplicates`]): `(type, id)` pairs declared
//!   by more than one file.
//!
//! [`lint`] runs all three and aggregates the result.
//!
//! ## Crate Policy
//!
//! - Depends only on `lore-core` internally.
//! - Malformed content is data, never an `Err` or a panic.
//! - Field shapes are decided once, in the [`Frontmatter`] accessor or a
//!   kind's parser (`Persona`, `StatRange`, ...), and checks work on the
//!   typed result.

pub mod card;
pub mod character;
pub mod duplicates;
pub mod error;
pub mod event;
pub mod frontmatter;
pub mod object;
pub mod references;
pub mod report;
pub mod rules;
pub mod validate;

pub use duplicates::{detect_duplicate_ids, DuplicateId};
pub use error::{SchemaError, SchemaReason};
pub use frontmatter::Frontmatter;
pub use references::{collect_broken_references, BrokenReference, ReferenceIndex};
pub use report::{lint, LintReport};
pub use rules::SchemaRules;
pub use validate::SchemaValidator;
