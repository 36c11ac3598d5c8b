use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

/// A named bundle of suffix rules. The name doubles as the strategy tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileTypeProfile {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl FileTypeProfile {
    pub fn new<S: Into<String>>(name: impl Into<String>, extensions: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            exclusions: Vec::new(),
        }
    }

    pub fn with_exclusions<S: Into<String>>(mut self, exclusions: impl IntoIterator<Item = S>) -> Self {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Built-in profiles in their registration order.
    pub fn defaults() -> Vec<FileTypeProfile> {
        vec![
            FileTypeProfile::new("java", [".java", ".fxml"]),
            FileTypeProfile::new("typescript", [".ts", ".tsx"]),
            FileTypeProfile::new("properties", [".properties"]),
            FileTypeProfile::new("dart", [".dart"]),
            FileTypeProfile::new("kotlin", [".kt", ".xml"]),
        ]
    }
}

/// How files of equal size are ordered relative to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Keep walk order (stable sort). Walk order is filesystem dependent.
    #[default]
    Discovery,
    /// Ascending path string.
    Path,
}

/// Immutable configuration for one collection run. Build with
/// [`CollectConfig::builder`].
#[derive(Debug, Clone, Serialize)]
pub struct CollectConfig {
    output_path: PathBuf,
    roots: Vec<PathBuf>,
    ignores: Vec<String>,
    profiles: Vec<FileTypeProfile>,
    tie_break: TieBreak,
    open_output: bool,
}

impl CollectConfig {
    pub fn builder() -> CollectConfigBuilder {
        CollectConfigBuilder::default()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Absolute ignore prefixes.
    pub fn ignores(&self) -> &[String] {
        &self.ignores
    }

    pub fn profiles(&self) -> &[FileTypeProfile] {
        &self.profiles
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn open_output(&self) -> bool {
        self.open_output
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_parts(Some(&self.output_path), &self.roots, &self.profiles)
    }

    pub fn trace_loaded(&self) {
        info!(
            output = %self.output_path.display(),
            roots_count = self.roots.len(),
            ignores_count = self.ignores.len(),
            profiles_count = self.profiles.len(),
            "Loaded CollectConfig"
        );
        debug!(?self, "CollectConfig loaded (full debug)");
    }
}

fn validate_parts(
    output_path: Option<&Path>,
    roots: &[PathBuf],
    profiles: &[FileTypeProfile],
) -> Result<(), ConfigError> {
    match output_path {
        Some(p) if !p.as_os_str().is_empty() => {}
        _ => return Err(ConfigError::MissingOutputPath),
    }
    if roots.is_empty() {
        return Err(ConfigError::NoSearchRoots);
    }
    if profiles.is_empty() {
        return Err(ConfigError::NoProfiles);
    }
    if profiles.iter().all(|p| p.extensions.is_empty()) {
        return Err(ConfigError::NoExtensions);
    }
    Ok(())
}

/// Fluent builder for [`CollectConfig`].
///
/// Starts with no profiles; call [`default_profiles`](Self::default_profiles)
/// to register the built-in ones.
#[derive(Debug, Default, Clone)]
pub struct CollectConfigBuilder {
    output_path: Option<PathBuf>,
    roots: Vec<PathBuf>,
    ignores: Vec<String>,
    profiles: Vec<FileTypeProfile>,
    tie_break: TieBreak,
    open_output: bool,
}

impl CollectConfigBuilder {
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Made absolute against the current directory.
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.roots.push(absolute(root.as_ref()));
        self
    }

    pub fn roots<P: AsRef<Path>>(self, roots: impl IntoIterator<Item = P>) -> Self {
        roots.into_iter().fold(self, |b, r| b.root(r))
    }

    /// Made absolute against the current directory, then matched as a plain
    /// string prefix. Trailing separators are dropped, so `gen/` behaves
    /// like `gen`.
    pub fn ignore(mut self, path: impl AsRef<Path>) -> Self {
        let normalized: PathBuf = absolute(path.as_ref()).components().collect();
        self.ignores.push(normalized.to_string_lossy().into_owned());
        self
    }

    pub fn ignores<P: AsRef<Path>>(self, paths: impl IntoIterator<Item = P>) -> Self {
        paths.into_iter().fold(self, |b, p| b.ignore(p))
    }

    /// Register a profile. A profile with the same name (case-insensitive)
    /// is replaced in place and keeps its position.
    pub fn profile(mut self, profile: FileTypeProfile) -> Self {
        match self
            .profiles
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&profile.name))
        {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        self
    }

    pub fn profiles(self, profiles: impl IntoIterator<Item = FileTypeProfile>) -> Self {
        profiles.into_iter().fold(self, |b, p| b.profile(p))
    }

    pub fn default_profiles(self) -> Self {
        self.profiles(FileTypeProfile::defaults())
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn open_output(mut self, open: bool) -> Self {
        self.open_output = open;
        self
    }

    pub fn build(self) -> Result<CollectConfig, ConfigError> {
        validate_parts(self.output_path.as_deref(), &self.roots, &self.profiles)?;
        Ok(CollectConfig {
            output_path: self.output_path.ok_or(ConfigError::MissingOutputPath)?,
            roots: self.roots,
            ignores: self.ignores,
            profiles: self.profiles,
            tie_break: self.tie_break,
            open_output: self.open_output,
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
