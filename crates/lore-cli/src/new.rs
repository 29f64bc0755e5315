//! # New Subcommand
//!
//! Scaffolds a content document from a template.
//!
//! ```bash
//! lore new character kael-nyx     # templates/character.md -> content/characters/kael-nyx.md
//! lore new event fall --templates lore/templates
//! ```
//!
//! The template's frontmatter is kept, `type` and `id` are set, and the
//! fields a fresh document needs to pass `lore check` are filled in. An
//! existing file is never overwritten.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::Args;
use serde_yaml::{Mapping, Value};

use lore_core::{split_frontmatter, EntityKind, UNKNOWN_SENTINEL};
use lore_schema::SchemaRules;

use crate::loader::{resolve_content_dir, CONTENT_DIR_ENV};

/// Kinds `lore new` can scaffold.
pub const SCAFFOLD_KINDS: [EntityKind; 4] = [
    EntityKind::Character,
    EntityKind::Event,
    EntityKind::Place,
    EntityKind::Planet,
];

/// Directory searched for `<type>.md` templates when none is given.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Arguments for the new subcommand.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Document type: character, event, place or planet.
    pub kind: String,

    /// Id of the new document; also its file name.
    pub id: String,

    /// Content directory receiving the file. Defaults to ./content.
    #[arg(
        long,
        env = CONTENT_DIR_ENV,
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub content_dir: Option<PathBuf>,

    /// Directory holding `<type>.md` templates.
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates: PathBuf,
}

/// Execute the new subcommand against the process environment.
pub fn run_new(args: &NewArgs) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let content_dir = resolve_content_dir(args.content_dir.as_deref(), &cwd);
    let templates_dir = cwd.join(&args.templates);
    let today = chrono::Local::now().date_naive();

    let mut stdout = std::io::stdout().lock();
    create_document(&content_dir, &templates_dir, &args.kind, &args.id, today, &mut stdout)?;
    Ok(0)
}

/// Write `<content_dir>/<kind dir>/<id>.md` from the kind's template and
/// report it on `out`. Returns the created path.
pub fn create_document(
    content_dir: &Path,
    templates_dir: &Path,
    kind: &str,
    id: &str,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<PathBuf> {
    let kind = match kind.parse::<EntityKind>() {
        Ok(kind) if SCAFFOLD_KINDS.contains(&kind) => kind,
        _ => bail!("unknown type {kind}"),
    };
    if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
        bail!("invalid id {id:?}");
    }

    let target = content_dir.join(kind.content_dir()).join(format!("{id}.md"));
    if target.exists() {
        bail!("{} already exists", target.display());
    }

    let template_path = templates_dir.join(format!("{}.md", kind.as_str()));
    let template = std::fs::read_to_string(&template_path)
        .with_context(|| format!("failed to read template {}", template_path.display()))?;
    let text = render(&template, kind, id, today)
        .with_context(|| format!("invalid template {}", template_path.display()))?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, text).with_context(|| format!("failed to write {}", target.display()))?;
    tracing::info!(kind = kind.as_str(), id, path = %target.display(), "created document");

    writeln!(out, "Created {}", target.display())?;
    Ok(target)
}

/// Fill a template's frontmatter for a new document and re-emit the file.
fn render(template: &str, kind: EntityKind, id: &str, today: NaiveDate) -> Result<String> {
    let (fields, body) = match split_frontmatter(template) {
        Some(block) => {
            let parsed: Value = serde_yaml::from_str(&block.raw)?;
            let fields = match parsed {
                Value::Mapping(map) => map,
                _ => Mapping::new(),
            };
            (fields, block.body)
        }
        None => (Mapping::new(), template),
    };

    let mut data = Mapping::new();
    data.insert("type".into(), kind.as_str().into());
    data.insert("id".into(), id.into());
    for (key, value) in fields {
        if key.as_str() != Some("type") && key.as_str() != Some("id") {
            data.insert(key, value);
        }
    }

    for field in SchemaRules::default().required_fields(kind) {
        if !data.get(field.as_str()).is_some_and(Value::is_string) {
            data.insert(field.as_str().into(), id.into());
        }
    }

    match kind {
        EntityKind::Character => {
            if !data.get("origin").is_some_and(Value::is_string) {
                data.insert("origin".into(), UNKNOWN_SENTINEL.into());
            }
        }
        EntityKind::Event => {
            if !data.get("date").is_some_and(Value::is_string) {
                data.insert("date".into(), today.format("%Y-%m-%d").to_string().into());
            }
            for field in ["who", "locations"] {
                if !data.get(field).is_some_and(Value::is_sequence) {
                    data.insert(field.into(), Value::Sequence(Vec::new()));
                }
            }
        }
        _ => {}
    }

    Ok(format!("---\n{}---\n{body}", serde_yaml::to_string(&data)?))
}
