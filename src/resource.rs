//! The shared append-only resource.
//!
//! Workers only ever do one thing to the resource: append a single line of
//! text. [`Resource`] is the seam for that operation so the worker does not
//! care whether the lines land in a file or somewhere a test controls.
//!
//! # Append Semantics
//!
//! [`AppendFile`] opens its path in append mode for every line, creating
//! the file if it doesn't exist. The parent directory is not created; a
//! missing directory is reported as a write failure like any other I/O
//! error. Each call writes the line and its trailing newline in a single
//! `write_all`, then syncs.

use crate::error::{MutexFileError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Something a worker can append lines to.
pub trait Resource: Send + Sync {
    /// Append one line. `line` must not contain a newline.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The whole line was appended
    /// * `Err(MutexFileError::ResourceWrite)` - Nothing usable was appended
    fn append_line(&self, line: &str) -> Result<()>;
}

/// A text file on disk, appended to line by line.
#[derive(Debug, Clone)]
pub struct AppendFile {
    path: PathBuf,
}

impl AppendFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> MutexFileError {
        MutexFileError::ResourceWrite {
            path: self.path().to_path_buf(),
            source,
        }
    }
}

impl Resource for AppendFile {
    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes())
            .map_err(|e| self.write_error(e))?;

        file.sync_all().map_err(|e| self.write_error(e))
    }
}
