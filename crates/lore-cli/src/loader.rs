//! # Document Loader
//!
//! Walks a content directory, collects every `*.md` file in sorted path
//! order, and parses each file's frontmatter into a [`LoreDocument`].
//!
//! A file whose frontmatter is not valid YAML does not abort the walk: its
//! path lands in [`LoadedCorpus::unparsable`] and the CLI counts it as an
//! error. Bytes that are not UTF-8 are replaced with `U+FFFD` and the file is
//! linted as usual. Failing to read a directory or a file is fatal.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use lore_core::{parse_frontmatter, LoreDocument, LoreError, LoreResult};

/// Environment variable naming the default content directory.
pub const CONTENT_DIR_ENV: &str = "LORE_CONTENT_DIR";

/// Directory used when neither an argument nor the environment names one.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Documents read from a content directory.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    /// Files with a typed frontmatter block, in path order.
    pub documents: Vec<LoreDocument>,
    /// Files whose frontmatter could not be parsed.
    pub unparsable: Vec<Unparsable>,
    /// Markdown files visited, including ones that yielded no document.
    pub files_scanned: usize,
}

/// A markdown file whose frontmatter was rejected by the parser.
#[derive(Debug)]
pub struct Unparsable {
    pub path: PathBuf,
    pub message: String,
}

/// Resolve the content directory.
///
/// `chosen` comes from the command line or `LORE_CONTENT_DIR`; when it is
/// missing or empty, `content` is used. Relative paths are joined onto `cwd`.
pub fn resolve_content_dir(chosen: Option<&Path>, cwd: &Path) -> PathBuf {
    let chosen = chosen
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or(Path::new(DEFAULT_CONTENT_DIR));
    if chosen.is_absolute() {
        chosen.to_path_buf()
    } else {
        cwd.join(chosen)
    }
}

/// Every `*.md` file under `root`, recursively, sorted by path.
pub fn markdown_files(root: &Path) -> LoreResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(LoreError::FileNotFound {
            path: root.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse every markdown file under `root`.
pub fn load_corpus(root: &Path) -> LoreResult<LoadedCorpus> {
    let files = markdown_files(root)?;
    let mut corpus = LoadedCorpus {
        files_scanned: files.len(),
        ..LoadedCorpus::default()
    };

    for path in files {
        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            tracing::warn!(path = %path.display(), "file is not valid UTF-8, decoded lossily");
        }
        match parse_frontmatter(&text, &path) {
            Ok(Some(document)) => corpus.documents.push(document),
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no typed frontmatter, skipping");
            }
            Err(err @ (LoreError::YamlParse { .. } | LoreError::UnsupportedYaml { .. })) => {
                tracing::warn!(path = %path.display(), "unparsable frontmatter: {err}");
                corpus.unparsable.push(Unparsable {
                    path,
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        files = corpus.files_scanned,
        documents = corpus.documents.len(),
        unparsable = corpus.unparsable.len(),
        "loaded content directory"
    );
    Ok(corpus)
}
