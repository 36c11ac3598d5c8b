//! Opens the output file with the platform's default application.

use source_digest_core::contract::Viewer;
use source_digest_core::error::ViewerError;
use std::path::Path;
use std::process::Command;

/// Shells out to the platform opener: `open` on macOS, `cmd /C start` on
/// Windows and `xdg-open` everywhere else.
#[derive(Debug, Clone)]
pub struct SystemViewer {
    program: String,
    args: Vec<String>,
}

impl Default for SystemViewer {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_program("open", Vec::<String>::new())
        } else if cfg!(target_os = "windows") {
            Self::with_program("cmd", ["/C", "start", ""])
        } else {
            Self::with_program("xdg-open", Vec::<String>::new())
        }
    }
}

impl SystemViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `program args... <path>` instead of the platform opener.
    pub fn with_program<S: Into<String>>(program: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError> {
        let program = which::which(&self.program).map_err(|_| ViewerError::NoOpener)?;
        tracing::debug!(program = %program.display(), path = %path.display(), "Opening output file");

        let status = Command::new(&program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| ViewerError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ViewerError::Status {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_no_opener() {
        let viewer = SystemViewer::with_program("definitely-not-an-opener-7f3a", Vec::<String>::new());
        let err = viewer.open(Path::new("/tmp/x.txt")).unwrap_err();
        assert!(matches!(err, ViewerError::NoOpener));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_checked() {
        let ok = SystemViewer::with_program("true", Vec::<String>::new());
        assert!(ok.open(Path::new("/tmp/x.txt")).is_ok());

        let failing = SystemViewer::with_program("false", Vec::<String>::new());
        let err = failing.open(Path::new("/tmp/x.txt")).unwrap_err();
        assert!(matches!(err, ViewerError::Status { .. }));
    }
}
