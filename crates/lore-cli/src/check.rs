//! # Check Subcommand
//!
//! Lints a content directory and reports every finding.
//!
//! ```bash
//! lore check                      # $LORE_CONTENT_DIR or ./content
//! lore check lore/ --format json
//! lore check --rules rules.yaml
//! ```
//!
//! Exit code `0` when the corpus is clean, `1` when anything was found
//! (unparsable frontmatter included).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{Args, ValueEnum};

use lore_schema::{lint, LintReport, SchemaRules, SchemaValidator};

use crate::loader::{load_corpus, resolve_content_dir, LoadedCorpus, CONTENT_DIR_ENV};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Content directory to lint. Defaults to ./content.
    #[arg(
        env = CONTENT_DIR_ENV,
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub content_dir: Option<PathBuf>,

    /// YAML file replacing the built-in schema rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How findings are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per finding and a summary line.
    Text,
    /// The lint report as pretty-printed JSON.
    Json,
}

/// Execute the check subcommand against the process environment.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let content_dir = resolve_content_dir(args.content_dir.as_deref(), &cwd);
    tracing::debug!(content_dir = %content_dir.display(), "resolved content directory");

    let mut stdout = std::io::stdout().lock();
    check_dir(&content_dir, args.rules.as_deref(), args.format, &mut stdout)
}

/// Lint `content_dir` and write the findings to `out`. Returns the exit code.
pub fn check_dir(
    content_dir: &Path,
    rules: Option<&Path>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<u8> {
    let rules = match rules {
        Some(path) => SchemaRules::load(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => SchemaRules::default(),
    };
    let validator = SchemaValidator::new(rules);

    let corpus = load_corpus(content_dir)
        .with_context(|| format!("failed to load content from {}", content_dir.display()))?;
    let report = lint(&corpus.documents, &validator);
    let error_count = report.error_count() + corpus.unparsable.len();

    match format {
        OutputFormat::Text => write_text(&corpus, &report, out)?,
        OutputFormat::Json => {
            for file in &corpus.unparsable {
                eprintln!("unparsable: {}", file.message);
            }
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(u8::from(error_count > 0))
}

fn write_text(corpus: &LoadedCorpus, report: &LintReport, out: &mut impl Write) -> Result<()> {
    for file in &corpus.unparsable {
        writeln!(out, "unparsable: {}", file.message)?;
    }
    for dup in &report.duplicate_ids {
        writeln!(out, "duplicate id: {dup}")?;
    }
    for broken in &report.broken_references {
        writeln!(out, "broken reference: {broken}")?;
    }
    for error in &report.schema_errors {
        writeln!(out, "schema error: {error}")?;
    }

    let total = report.error_count() + corpus.unparsable.len();
    if total == 0 {
        writeln!(out, "No errors.")?;
    } else {
        writeln!(out, "Found {total} errors.")?;
    }
    Ok(())
}
