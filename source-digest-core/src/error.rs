//! Error types for the collection pipeline.
//!
//! Only configuration and output-artifact failures are errors in the Rust
//! sense. Everything that happens to a single root, profile or file is
//! reported to the [`RunObserver`](crate::contract::RunObserver) instead and
//! never stops the run.

use std::path::PathBuf;

/// The run configuration is unusable. Raised before any filesystem access.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("output path is not set")]
    MissingOutputPath,

    #[error("no search roots configured")]
    NoSearchRoots,

    #[error("no file-type profiles configured")]
    NoProfiles,

    #[error("no file-type profile has any extensions")]
    NoExtensions,
}

/// The output artifact could not be prepared or written.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to prepare output file {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal outcome of [`Collector::run`](crate::collect::Collector::run).
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Best-effort viewer failures. Never fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("no default file opener available on this platform")]
    NoOpener,

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Status { program: String, status: String },
}
