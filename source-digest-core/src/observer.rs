//! [`RunObserver`] implementation that forwards run events to `tracing`.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::contract::{RunObserver, SkipReason};

/// Default observer: structured `tracing` events, warnings for everything
/// that made the run skip work.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn profile_started(&self, profile: &str, extensions: &[String]) {
        info!(profile, ?extensions, "Processing files for profile");
    }

    fn profile_finished(&self, profile: &str, appended: usize) {
        info!(profile, appended, "Finished profile");
    }

    fn unsupported_file_type(&self, profile: &str) {
        warn!(profile, "No strategy found for file type, skipping profile");
    }

    fn empty_extensions(&self, profile: &str) {
        warn!(profile, "Profile has no extensions, skipping profile");
    }

    fn root_missing(&self, root: &Path) {
        warn!(root = %root.display(), "Search root does not exist");
    }

    fn walk_error(&self, root: &Path, reason: &str) {
        warn!(root = %root.display(), reason, "Failed to inspect entry during walk");
    }

    fn file_skipped(&self, path: &Path, reason: SkipReason) {
        debug!(path = %path.display(), reason = reason.as_str(), "Skipping file");
    }

    fn file_unreadable(&self, path: &Path, reason: &str) {
        warn!(path = %path.display(), reason, "Error processing file");
    }

    fn file_appended(&self, path: &Path, lines: usize) {
        debug!(path = %path.display(), lines, "Appended file");
    }

    fn viewer_failed(&self, path: &Path, reason: &str) {
        warn!(path = %path.display(), reason, "Unable to open output file");
    }
}
