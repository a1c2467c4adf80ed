use std::{
    collections::{HashSet, VecDeque},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    metadata::Post,
    parser::{parse_with, FormatError, ParseOptions},
};

/// What to do when one post fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnError {
    /// Record the failure and keep going.
    #[default]
    Skip,
    Abort,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub parse: ParseOptions,
    pub on_error: OnError,
    /// File extensions (without the dot) treated as posts.
    pub extensions: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            on_error: OnError::default(),
            extensions: vec!["md".to_string()],
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Relative to the loaded directory.
    pub path: PathBuf,
    #[serde(flatten)]
    pub post: Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub error: FormatError,
}

#[derive(Debug, Default)]
pub struct Batch {
    pub documents: Vec<Document>,
    pub failures: Vec<Failure>,
}

impl LoadOptions {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| self.extensions.iter().any(|x| x == e))
    }
}

/// Reads one file. The outer error is I/O, the inner one is the post's format.
pub fn load_file(
    path: &Path,
    options: &ParseOptions,
) -> anyhow::Result<Result<Post, FormatError>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))?;
    Ok(parse_with(&content, options))
}

/// Parses every post under `root`, breadth-first, in name order within a directory.
pub fn load_dir(root: &Path, options: &LoadOptions) -> anyhow::Result<Batch> {
    let mut batch = Batch::default();

    let mut visited = HashSet::new();
    visited.insert(root.canonicalize().with_context(|| format!("while listing {root:?}"))?);

    let mut q = VecDeque::new();
    q.push_back(PathBuf::new());
    while let Some(path) = q.pop_front() {
        let current_searching_directory_path = root.join(&path);

        let mut entries = std::fs::read_dir(&current_searching_directory_path)
            .with_context(|| format!("while listing {current_searching_directory_path:?}"))?
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let relative = path.join(entry.file_name());
            // follows symlinks, unlike `DirEntry::metadata`
            let meta = match std::fs::metadata(root.join(&relative)) {
                Ok(meta) => meta,
                Err(e) => {
                    warn!("skipping {relative:?}: {e}");
                    continue;
                }
            };

            if meta.is_dir() {
                // a symlinked directory may point back up the tree
                if visited.insert(root.join(&relative).canonicalize()?) {
                    q.push_back(relative);
                } else {
                    debug!("skipping {relative:?}: already visited");
                }
            } else if !meta.is_file() || !options.accepts(&relative) {
                debug!("skipping {relative:?}");
            } else {
                debug!("parsing {relative:?}");
                match load_file(&root.join(&relative), &options.parse)? {
                    Ok(post) => batch.documents.push(Document {
                        path: relative,
                        post,
                    }),
                    Err(error) => {
                        if options.on_error == OnError::Abort {
                            return Err(error)
                                .with_context(|| format!("while parsing {relative:?}"));
                        }
                        debug!("{relative:?}: {error}");
                        batch.failures.push(Failure {
                            path: relative,
                            error,
                        });
                    }
                }
            }
        }
    }

    info!(
        "loaded {} posts from {root:?} ({} failed)",
        batch.documents.len(),
        batch.failures.len()
    );
    Ok(batch)
}
