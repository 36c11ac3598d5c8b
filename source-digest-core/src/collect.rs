//! Orchestration: one pass over every profile, appending filtered files to
//! the shared output artifact.
//!
//! A run goes through these steps:
//!   - validate the configuration (fatal on failure, before any I/O)
//!   - truncate the output artifact
//!   - per profile, in registration order: resolve the strategy, discover
//!     files under every root, order them by size (largest first) and
//!     append each one through the strategy
//!   - hand the artifact to the viewer when asked to
//!
//! # Error Handling
//! Only [`CollectError`] escapes. A missing root, an unsupported profile, or
//! a file that vanished or cannot be read is reported to the
//! [`RunObserver`] and the run moves on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{CollectConfig, FileTypeProfile, TieBreak};
use crate::contract::{DiscoveredFile, RunObserver, SkipReason, Viewer};
use crate::discovery::{discover, FileRules};
use crate::error::{CollectError, OutputError};
use crate::observer::TracingObserver;
use crate::output::OutputArtifact;
use crate::strategy::{ContentStrategy, StrategyRegistry};

/// Outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct CollectReport {
    pub output_path: PathBuf,
    pub profiles: Vec<ProfileReport>,
}

impl CollectReport {
    /// Blocks written across all profiles.
    pub fn appended(&self) -> usize {
        self.profiles.iter().map(|p| p.appended).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Processed,
    Unsupported,
    NoExtensions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub name: String,
    pub status: ProfileStatus,
    pub discovered: usize,
    pub appended: usize,
    pub skipped: usize,
}

impl ProfileReport {
    fn new(name: &str, status: ProfileStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            discovered: 0,
            appended: 0,
            skipped: 0,
        }
    }
}

/// Runs a [`CollectConfig`]. Events go to [`TracingObserver`] unless another
/// observer is injected; no viewer is used unless one is injected.
pub struct Collector<'a> {
    config: &'a CollectConfig,
    registry: StrategyRegistry,
    observer: &'a dyn RunObserver,
    viewer: Option<&'a dyn Viewer>,
}

impl<'a> Collector<'a> {
    pub fn new(config: &'a CollectConfig) -> Self {
        Self {
            config,
            registry: StrategyRegistry::new(),
            observer: &TracingObserver,
            viewer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn RunObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_viewer(mut self, viewer: &'a dyn Viewer) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn run(&self) -> Result<CollectReport, CollectError> {
        self.config.validate()?;

        let mut artifact = OutputArtifact::create(self.config.output_path())?;
        let own_output = fs::canonicalize(artifact.path()).ok();

        let mut profiles = Vec::with_capacity(self.config.profiles().len());
        for profile in self.config.profiles() {
            profiles.push(self.collect_profile(profile, &mut artifact, own_output.as_deref())?);
        }

        let output_path = artifact.finish()?;
        if self.config.open_output() {
            if let Some(viewer) = self.viewer {
                if let Err(e) = viewer.open(&output_path) {
                    self.observer.viewer_failed(&output_path, &e.to_string());
                }
            }
        }

        Ok(CollectReport {
            output_path,
            profiles,
        })
    }

    fn collect_profile(
        &self,
        profile: &FileTypeProfile,
        artifact: &mut OutputArtifact,
        own_output: Option<&Path>,
    ) -> Result<ProfileReport, OutputError> {
        let Some(strategy) = self.registry.create_strategy(&profile.name) else {
            self.observer.unsupported_file_type(&profile.name);
            return Ok(ProfileReport::new(&profile.name, ProfileStatus::Unsupported));
        };
        if profile.extensions.is_empty() {
            self.observer.empty_extensions(&profile.name);
            return Ok(ProfileReport::new(&profile.name, ProfileStatus::NoExtensions));
        }

        self.observer.profile_started(&profile.name, &profile.extensions);
        let mut report = ProfileReport::new(&profile.name, ProfileStatus::Processed);

        let rules = FileRules::new(&profile.extensions, &profile.exclusions, self.config.ignores());
        let mut candidates: Vec<DiscoveredFile> = self
            .config
            .roots()
            .iter()
            .flat_map(|root| discover(root, &rules, self.observer))
            .collect();
        report.discovered = candidates.len();

        candidates.retain(|file| {
            let is_output = is_same_file(&file.path, own_output);
            if is_output {
                self.observer.file_skipped(&file.path, SkipReason::OutputArtifact);
            }
            !is_output
        });
        report.skipped = report.discovered - candidates.len();

        order_by_size(&mut candidates, self.config.tie_break());

        for file in &candidates {
            if self.append_file(&strategy, &file.path, artifact)? {
                report.appended += 1;
            } else {
                report.skipped += 1;
            }
        }

        self.observer.profile_finished(&profile.name, report.appended);
        Ok(report)
    }

    /// `Ok(false)` when the file was skipped for any per-file reason.
    fn append_file(
        &self,
        strategy: &ContentStrategy,
        path: &Path,
        artifact: &mut OutputArtifact,
    ) -> Result<bool, OutputError> {
        match fs::metadata(path) {
            Ok(meta) if meta.len() == 0 => {
                self.observer.file_skipped(path, SkipReason::Empty);
                return Ok(false);
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.observer.file_skipped(path, SkipReason::Vanished);
                return Ok(false);
            }
            Err(e) => {
                self.observer.file_unreadable(path, &e.to_string());
                return Ok(false);
            }
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.observer.file_skipped(path, SkipReason::Vanished);
                return Ok(false);
            }
            Err(e) => {
                self.observer.file_unreadable(path, &e.to_string());
                return Ok(false);
            }
        };

        let lines = strategy.process_lines(path, text.lines());
        if lines.is_empty() {
            return Ok(false);
        }
        artifact.append_block(&lines)?;
        self.observer.file_appended(path, lines.len());
        Ok(true)
    }
}

/// Largest first. The sort is stable, so with [`TieBreak::Discovery`] equal
/// sizes keep their walk order.
pub fn order_by_size(files: &mut [DiscoveredFile], tie_break: TieBreak) {
    match tie_break {
        TieBreak::Discovery => files.sort_by(|a, b| b.byte_size.cmp(&a.byte_size)),
        TieBreak::Path => files.sort_by(|a, b| {
            b.byte_size
                .cmp(&a.byte_size)
                .then_with(|| a.path.as_os_str().cmp(b.path.as_os_str()))
        }),
    }
}

fn is_same_file(candidate: &Path, own_output: Option<&Path>) -> bool {
    let Some(output) = own_output else {
        return false;
    };
    if candidate.file_name() != output.file_name() {
        return false;
    }
    fs::canonicalize(candidate).is_ok_and(|c| c == output)
}
