//! `trace-cmd report` as a text dump source.

use super::{raw_capture_path, text_dump_path, TextDumpSource};
use crate::utils::config::DEFAULT_TRACE_CMD;
use crate::utils::error::SourceError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs `<program> report` when `trace.txt` is missing but `trace.dat` exists
#[derive(Debug, Clone)]
pub struct TraceCmdReport {
    program: String,
}

impl TraceCmdReport {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the report and write its stdout to `text`, overwriting it
    ///
    /// **Private** - internal helper for ensure_text_dump
    fn run_report(&self, basepath: &Path, text: &Path) -> Result<(), SourceError> {
        info!("Running {} report in {}", self.program, basepath.display());

        let output = Command::new(&self.program)
            .arg("report")
            .current_dir(basepath)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| SourceError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::ReportFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        std::fs::write(text, &output.stdout)?;
        debug!("Wrote {} bytes to {}", output.stdout.len(), text.display());

        Ok(())
    }
}

impl Default for TraceCmdReport {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CMD)
    }
}

impl TextDumpSource for TraceCmdReport {
    fn ensure_text_dump(&self, basepath: &Path) -> Result<PathBuf, SourceError> {
        let text = text_dump_path(basepath);
        if text.is_file() {
            debug!("Using cached text dump {}", text.display());
            return Ok(text);
        }

        let raw = raw_capture_path(basepath);
        if !raw.is_file() {
            return Err(SourceError::Unavailable { text, raw });
        }

        self.run_report(basepath, &text)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_text_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("trace.txt"), "").unwrap();

        // program never runs when the cache exists
        let source = TraceCmdReport::new("/nonexistent/trace-cmd");
        let path = source.ensure_text_dump(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("trace.txt"));
    }

    #[test]
    fn test_unavailable_without_dat() {
        let dir = tempfile::tempdir().unwrap();
        let result = TraceCmdReport::default().ensure_text_dump(dir.path());
        assert!(matches!(result, Err(SourceError::Unavailable { .. })));
    }

    #[test]
    fn test_spawn_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("trace.dat"), b"raw").unwrap();

        let source = TraceCmdReport::new("/nonexistent/trace-cmd");
        let result = source.ensure_text_dump(dir.path());

        assert!(matches!(result, Err(SourceError::SpawnFailed { .. })));
        assert!(!dir.path().join("trace.txt").exists());
    }
}
