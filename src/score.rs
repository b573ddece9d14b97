use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::LEADERBOARD_CAPACITY;

const APP_DIR_NAME: &str = "snake-core";
const SCORE_FILE_NAME: &str = "scores.json";

/// One finished game on the leaderboard.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    pub date: DateTime<Local>,
    /// Snake length when the game ended.
    pub length: usize,
}

/// Best results kept in descending score order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<HighScore>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(LEADERBOARD_CAPACITY)
    }
}

impl Leaderboard {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Builds a board from entries in any order, keeping the best `capacity`.
    #[must_use]
    pub fn from_entries(capacity: usize, mut entries: Vec<HighScore>) -> Self {
        // Stable sort: among equal scores the earlier entry keeps the higher rank.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { capacity, entries }
    }

    /// Records a finished game and returns its zero-based rank, or `None`
    /// when it did not make the board.
    pub fn record(&mut self, score: u32, length: usize, date: DateTime<Local>) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());
        if rank >= self.capacity {
            return None;
        }

        self.entries.insert(
            rank,
            HighScore {
                score,
                date,
                length,
            },
        );
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    /// Highest recorded score.
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.score)
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Durable home of the leaderboard, injected into the driver.
pub trait ScoreStore {
    fn load(&self) -> io::Result<Leaderboard>;
    fn save(&mut self, board: &Leaderboard) -> io::Result<()>;
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    board: Leaderboard,
    saves: usize,
}

impl MemoryStore {
    /// Number of successful saves so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }

    #[must_use]
    pub fn board(&self) -> &Leaderboard {
        &self.board
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> io::Result<Leaderboard> {
        Ok(self.board.clone())
    }

    fn save(&mut self, board: &Leaderboard) -> io::Result<()> {
        self.board = board.clone();
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScoreFile {
    entries: Vec<HighScore>,
}

/// Leaderboard stored as pretty-printed JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    capacity: usize,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            capacity: LEADERBOARD_CAPACITY,
        }
    }

    /// Store at the platform-correct score file path.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    /// Returns an empty board when the score file does not yet exist (first
    /// run) and `InvalidData` when it exists but cannot be parsed.
    fn load(&self) -> io::Result<Leaderboard> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no score file at {}, starting empty", self.path.display());
                return Ok(Leaderboard::new(self.capacity));
            }
            Err(e) => return Err(e),
        };

        serde_json::from_str::<ScoreFile>(&raw)
            .map(|file| Leaderboard::from_entries(self.capacity, file.entries))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Creates parent directories when needed.
    fn save(&mut self, board: &Leaderboard) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = ScoreFile {
            entries: board.entries().to_vec(),
        };
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

        fs::write(&self.path, json)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}
