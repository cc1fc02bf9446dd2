//! Access to the text dump produced by the trace capture tool.
//!
//! Parsing only ever sees a path to a text file. How that file comes to
//! exist is behind [`TextDumpSource`].

pub mod trace_cmd;

use crate::utils::config::{TRACE_DAT_FILE, TRACE_TEXT_FILE};
use crate::utils::error::SourceError;
use std::path::{Path, PathBuf};

pub use trace_cmd::TraceCmdReport;

/// Port to whatever produces `trace.txt`
pub trait TextDumpSource {
    /// Return the path of the text dump for `basepath`, producing it if needed
    ///
    /// # Errors
    /// * `SourceError::Unavailable` - no cached dump and no raw capture
    fn ensure_text_dump(&self, basepath: &Path) -> Result<PathBuf, SourceError>;
}

/// Source that only accepts an existing `trace.txt`
#[derive(Debug, Clone, Copy, Default)]
pub struct CachedTextDump;

impl TextDumpSource for CachedTextDump {
    fn ensure_text_dump(&self, basepath: &Path) -> Result<PathBuf, SourceError> {
        let text = text_dump_path(basepath);
        if text.is_file() {
            Ok(text)
        } else {
            Err(SourceError::Unavailable {
                text,
                raw: raw_capture_path(basepath),
            })
        }
    }
}

/// `<basepath>/trace.txt`
pub fn text_dump_path(basepath: &Path) -> PathBuf {
    basepath.join(TRACE_TEXT_FILE)
}

/// `<basepath>/trace.dat`
pub fn raw_capture_path(basepath: &Path) -> PathBuf {
    basepath.join(TRACE_DAT_FILE)
}
