//! Best score kept in a small JSON file: `{ "best_score": N }`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::BestScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u32,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored value, distinguishing "missing" from "unreadable".
    pub fn read(&self) -> Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        let file: BestScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parse {}", self.path.display()))?;
        Ok(Some(file.best_score))
    }

    pub fn write(&self, best_score: u32) -> Result<()> {
        let line = serde_json::to_string(&BestScoreFile { best_score })?;
        fs::write(&self.path, line).with_context(|| format!("write {}", self.path.display()))
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&self) -> u32 {
        match self.read() {
            Ok(Some(score)) => score,
            Ok(None) => {
                debug!("no best score at {}", self.path.display());
                0
            }
            Err(e) => {
                warn!("ignoring best score file: {:#}", e);
                0
            }
        }
    }

    fn save_best_score(&self, score: u32) {
        if let Err(e) = self.write(score) {
            warn!("could not save best score: {:#}", e);
        }
    }
}
