//! A file's text held in memory while the cleaning passes run over it.

use crate::error::{CleanError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The decoded contents of one file.
///
/// Read once, changed in memory by each pass, then written back at most once.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
    modified: bool,
}

impl SourceFile {
    /// Read `path` as UTF-8 text
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CleanError::io(path, e))?;
        Ok(SourceFile {
            path: path.to_path_buf(),
            content,
            modified: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Swap in the output of a pass that changed something
    pub fn replace(&mut self, content: String) {
        self.content = content;
        self.modified = true;
    }

    /// Write the content back if any pass changed it and `dry_run` is off.
    ///
    /// Returns whether the file was written.
    pub fn save(&self, dry_run: bool) -> Result<bool> {
        if !self.modified || dry_run {
            return Ok(false);
        }
        fs::write(&self.path, &self.content).map_err(|e| CleanError::io(&self.path, e))?;
        Ok(true)
    }
}
