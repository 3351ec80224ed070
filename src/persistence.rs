//! Best-distance storage
//!
//! The game only remembers one number: the longest distance ever driven, in
//! whole metres.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::debug;

/// Get/set access to the stored best distance
pub trait BestDistanceStore: Send + Sync {
    /// Stored best distance; 0 when nothing has been stored yet
    fn load(&self) -> Result<u64>;

    fn save(&mut self, best: u64) -> Result<()>;
}

/// Keeps the best distance in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl BestDistanceStore for MemoryStore {
    fn load(&self) -> Result<u64> {
        Ok(self.best)
    }

    fn save(&mut self, best: u64) -> Result<()> {
        self.best = best;
        Ok(())
    }
}

/// Stores the best distance as a decimal integer in a text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse the contents of a best-distance file
pub fn parse_best(contents: &str) -> Result<u64> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if trimmed.starts_with('-') {
        bail!("best distance cannot be negative: {}", trimmed);
    }
    trimmed
        .parse::<u64>()
        .with_context(|| format!("invalid best distance '{}'", trimmed))
}

impl BestDistanceStore for FileStore {
    fn load(&self) -> Result<u64> {
        if !self.path.exists() {
            debug!("No best distance file at {}", self.path.display());
            return Ok(0);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        parse_best(&contents).with_context(|| format!("Corrupt file {}", self.path.display()))
    }

    fn save(&mut self, best: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::write(&self.path, format!("{}\n", best))
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}
