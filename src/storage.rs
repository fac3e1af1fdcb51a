// File: ./src/storage.rs
//! Crash-safe replacement of the preference file.
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore;

impl FileStore {
    /// `config.toml` stages as `config.toml.tmp` in the same directory, so the
    /// final rename never crosses a filesystem.
    fn staging_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Replaces `path` in one step. Readers see the old or the new contents,
    /// never a partial file.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let staging = Self::staging_path(path);
        fs::write(&staging, contents)
            .with_context(|| format!("Could not stage '{}'", staging.display()))?;
        fs::rename(&staging, path)
            .with_context(|| format!("Could not move new contents into '{}'", path.display()))?;
        Ok(())
    }
}
