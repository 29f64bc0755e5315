//! # lore-cli — Command-Line Interface for the Lore Linter
//!
//! Provides the `lore` binary. The library half holds the filesystem
//! loader and the subcommand handlers so they can be tested without
//! spawning a process.
//!
//! ## Subcommands
//!
//! - `lore check [CONTENT_DIR]`: lint a content directory.
//! - `lore new <TYPE> <ID>`: scaffold a document from `templates/<TYPE>.md`.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers take parsed args.
//! - Handlers return an exit code (`anyhow::Result<u8>`); all linting
//!   logic lives in `lore-schema`.
//! - Findings go to stdout, logs to stderr.

pub mod check;
pub mod loader;
pub mod new;
