// File: ./src/context.rs
//! Where the preference file lives.
//!
//! Anything that reads or writes preferences is handed a `&dyn AppContext`.
//! The binary uses [`StandardContext`]; tests use [`TestContext`], which owns
//! a throwaway directory.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub const PREFERENCES_FILE: &str = "config.toml";

pub trait AppContext: Send + Sync + std::fmt::Debug {
    /// Directory holding the preference file. Created on demand.
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(PREFERENCES_FILE))
    }
}

fn create_dir(dir: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create preference directory '{}'", dir.display()))?;
    Ok(dir)
}

/// The user's platform config directory, or `<root>/config` under `--root`.
#[derive(Clone, Debug, Default)]
pub struct StandardContext {
    root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }
}

impl AppContext for StandardContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        let dir = match &self.root {
            Some(root) => root.join("config"),
            None => ProjectDirs::from("com", "statfill", "statfill")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .context("Could not determine a home directory for preferences")?,
        };
        create_dir(dir)
    }
}

/// A unique directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("statfill_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root).expect("failed to create test directory");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        create_dir(self.root.join("config"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
