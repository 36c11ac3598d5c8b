//! Recursive file discovery under a search root.
//!
//! Matching is plain string work on the absolute path: ignore rules are
//! prefixes, extension and exclusion rules are case-insensitive suffixes.
//! None of them are globs, and none of them know about path segments, so an
//! ignore rule `/a/b` also hides `/a/bc/x.java`, the extension `.ts` matches
//! `types.d.ts` and the dotless extension `ts` matches `y.xts`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::contract::{DiscoveredFile, RunObserver};

/// The three rule sets a file has to pass.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    extensions: Vec<String>,
    exclusions: Vec<String>,
    ignores: Vec<String>,
}

impl FileRules {
    /// `ignores` are compared verbatim; callers hand in absolute paths.
    pub fn new<E, X, I>(extensions: E, exclusions: X, ignores: I) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        X: IntoIterator,
        X::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
            exclusions: exclusions
                .into_iter()
                .map(|x| x.as_ref().to_lowercase())
                .collect(),
            ignores: ignores.into_iter().map(|i| i.as_ref().to_string()).collect(),
        }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.ignores.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn has_matching_extension(&self, path: &Path) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();
        self.exclusions.iter().any(|ex| lowered.ends_with(ex.as_str()))
    }

    /// Ignore, extension and exclusion tests combined.
    pub fn accepts(&self, path: &Path) -> bool {
        !self.is_ignored(path) && self.has_matching_extension(path) && !self.is_excluded(path)
    }
}

/// Lazily walk `root` depth-first and yield every regular file `rules`
/// accepts.
///
/// A missing root is reported to `observer` and yields nothing. Entries the
/// walk cannot inspect are reported and skipped. Directory symlinks are not
/// followed; a symlink to a regular file counts as a regular file. The order
/// of the yielded files is whatever the filesystem returns.
pub fn discover<'a>(
    root: &'a Path,
    rules: &'a FileRules,
    observer: &'a dyn RunObserver,
) -> impl Iterator<Item = DiscoveredFile> + 'a {
    let walker = if root.exists() {
        Some(WalkDir::new(absolute(root)))
    } else {
        observer.root_missing(root);
        None
    };

    walker
        .into_iter()
        .flat_map(|w| w.into_iter())
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                observer.walk_error(root, &e.to_string());
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter(move |entry| rules.accepts(entry.path()))
        .filter_map(move |entry| match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => Some(DiscoveredFile {
                path: entry.into_path(),
                byte_size: meta.len(),
            }),
            Ok(_) => None,
            Err(e) => {
                observer.walk_error(root, &format!("{}: {e}", entry.path().display()));
                None
            }
        })
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
