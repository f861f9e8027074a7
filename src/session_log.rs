//! Append-only activity log of a clock session.
//!
//! One human-readable line per event, prefixed with the local time.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub struct SessionLog {
    path: Option<PathBuf>,
}

impl SessionLog {
    /// Opens the log, creating parent directories, and writes a session header.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let log = Self {
            path: Some(path.to_path_buf()),
        };
        log.append(&format!(
            "=== Session started at {} ===",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))?;
        Ok(log)
    }

    /// A log that drops every line.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records a timestamped event. Write failures are reported, not fatal.
    pub fn log(&self, message: &str) {
        let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        if let Err(e) = self.append(&line) {
            tracing::warn!("failed to write activity log: {}", e);
        }
    }

    fn append(&self, line: &str) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
