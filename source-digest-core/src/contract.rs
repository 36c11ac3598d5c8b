//! # contract: seams between the pipeline and its collaborators
//!
//! The collector never reaches for process-wide state. Everything it wants to
//! say about a run goes to a [`RunObserver`], and the optional "open the
//! result" step goes through a [`Viewer`]. Both traits are annotated for
//! `mockall` so tests can assert on exactly which events a run produced.
//!
//! The plain data types shared by discovery and the collector live here too.

use std::path::{Path, PathBuf};

use mockall::automock;

use crate::error::ViewerError;

/// A regular file found by discovery, with its size at walk time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub byte_size: u64,
}

/// Why a discovered file was not appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file disappeared between discovery and reading.
    Vanished,
    /// The file is zero bytes at read time.
    Empty,
    /// The file is the output artifact of the current run.
    OutputArtifact,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Vanished => "vanished",
            SkipReason::Empty => "empty",
            SkipReason::OutputArtifact => "output_artifact",
        }
    }
}

/// Receiver of everything noteworthy that happens during a run.
///
/// All per-root, per-profile and per-file problems end up here; none of them
/// abort the run. Implementations decide whether to log, count or ignore.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait RunObserver {
    /// A profile with a resolved strategy is about to be processed.
    fn profile_started(&self, profile: &str, extensions: &[String]);

    /// A profile finished; `appended` blocks were written for it.
    fn profile_finished(&self, profile: &str, appended: usize);

    /// The profile's tag has no registered strategy; the profile is skipped.
    fn unsupported_file_type(&self, profile: &str);

    /// The profile has no extensions, so it can never match a file.
    fn empty_extensions(&self, profile: &str);

    /// A search root does not exist; it is skipped for this profile.
    fn root_missing(&self, root: &Path);

    /// An entry below `root` could not be inspected during the walk.
    fn walk_error(&self, root: &Path, reason: &str);

    /// A discovered file was skipped before reading.
    fn file_skipped(&self, path: &Path, reason: SkipReason);

    /// A discovered file could not be read as text.
    fn file_unreadable(&self, path: &Path, reason: &str);

    /// A block of `lines` lines (header included) was appended for `path`.
    fn file_appended(&self, path: &Path, lines: usize);

    /// The best-effort viewer could not open the output artifact.
    fn viewer_failed(&self, path: &Path, reason: &str);
}

/// Opens the finished output artifact for the user.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Viewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError>;
}

/// Observer that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {
    fn profile_started(&self, _profile: &str, _extensions: &[String]) {}
    fn profile_finished(&self, _profile: &str, _appended: usize) {}
    fn unsupported_file_type(&self, _profile: &str) {}
    fn empty_extensions(&self, _profile: &str) {}
    fn root_missing(&self, _root: &Path) {}
    fn walk_error(&self, _root: &Path, _reason: &str) {}
    fn file_skipped(&self, _path: &Path, _reason: SkipReason) {}
    fn file_unreadable(&self, _path: &Path, _reason: &str) {}
    fn file_appended(&self, _path: &Path, _lines: usize) {}
    fn viewer_failed(&self, _path: &Path, _reason: &str) {}
}
