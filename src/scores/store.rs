use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, warn};
use tempfile::NamedTempFile;

use super::Leaderboard;

/// Durable home of the leaderboard, one JSON file. Loading is
/// forgiving so a damaged file never blocks play; writing goes through
/// a temp file and rename so the previous board survives a crash.
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the board from disk. A missing, unreadable or malformed
    /// file comes back as an empty board.
    pub fn load(&self) -> Leaderboard {
        match self.try_load() {
            Ok(board) => board,
            Err(err) => {
                warn!("high score file unusable, starting fresh: {err:#}");
                Leaderboard::default()
            }
        }
    }

    fn try_load(&self) -> Result<Leaderboard> {
        if !self.path.exists() {
            return Ok(Leaderboard::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))
    }

    /// Write the whole board to disk. Failure is logged and swallowed;
    /// the in-memory board stays authoritative for the session.
    pub fn persist(&self, board: &Leaderboard) {
        if let Err(err) = self.try_persist(board) {
            error!("failed to persist high scores: {err:#}");
        }
    }

    fn try_persist(&self, board: &Leaderboard) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

        let json = serde_json::to_string_pretty(board).context("serializing high scores")?;

        // Write-then-rename keeps the old file intact on failure.
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        file.write_all(json.as_bytes()).context("writing high scores")?;
        file.persist(&self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        Ok(())
    }
}
