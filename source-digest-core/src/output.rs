//! The aggregated output file: truncated once per run, then append-only.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::OutputError;

pub struct OutputArtifact {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputArtifact {
    /// Delete `path` if present, create missing parent directories and open
    /// a fresh empty file for appending.
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        let prepare = |source: io::Error| OutputError::Prepare {
            path: path.to_path_buf(),
            source,
        };

        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(prepare(e)),
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(prepare)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(prepare)?;

        Ok(Self {
            path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
            writer: BufWriter::new(file),
        })
    }

    /// Absolute path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `lines`, each newline-terminated, then one blank separator line.
    /// The block is flushed before returning.
    pub fn append_block<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<(), OutputError> {
        self.write_block(lines).map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn write_block<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            self.writer.write_all(line.as_ref().as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Flush and close, returning the artifact path.
    pub fn finish(mut self) -> Result<PathBuf, OutputError> {
        self.writer.flush().map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.path)
    }
}
