use crate::vault::layout::message_path;
use crate::vault::loader::{self, ScanReport};
use crate::vault::record::NewMessage;
use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendStatus {
    Saved,
    Exists,
}

#[derive(Debug, Clone)]
pub struct AppendOutcome {
    pub status: AppendStatus,
    pub path: PathBuf,
}

/// The on-disk message archive. Only ever creates new files.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, message: &NewMessage) -> PathBuf {
        message_path(&self.root, message)
    }

    /// Write `message` unless a file already sits at its path.
    ///
    /// The body is staged in a temporary file next to the target and linked
    /// into place without clobbering, so readers never see a partial `.txt`.
    pub fn append(&self, message: &NewMessage) -> Result<AppendOutcome> {
        let path = self.path_for(message);
        if path.exists() {
            return Ok(AppendOutcome {
                status: AppendStatus::Exists,
                path,
            });
        }

        let parent = path
            .parent()
            .with_context(|| format!("message path {} has no parent", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let mut staged = NamedTempFile::new_in(parent)
            .with_context(|| format!("failed to stage message in {}", parent.display()))?;
        staged
            .write_all(message.body.as_bytes())
            .with_context(|| format!("failed to write staged message for {}", path.display()))?;
        staged
            .as_file()
            .sync_all()
            .with_context(|| format!("failed to flush staged message for {}", path.display()))?;

        match staged.persist_noclobber(&path) {
            Ok(_) => Ok(AppendOutcome {
                status: AppendStatus::Saved,
                path,
            }),
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => Ok(AppendOutcome {
                status: AppendStatus::Exists,
                path,
            }),
            Err(err) => {
                Err(err.error).with_context(|| format!("failed to persist {}", path.display()))
            }
        }
    }

    pub fn scan(&self) -> ScanReport {
        loader::scan(&self.root)
    }
}
