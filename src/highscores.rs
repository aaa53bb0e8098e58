//! High score leaderboard
//!
//! Persisted as an append-only text file of `name:score` lines. Writes never
//! rewrite history; reads sort on the fly.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Rows shown on the leaderboard screen
pub const LEADERBOARD_SIZE: usize = 10;

/// Default file name, relative to the working directory
pub const DEFAULT_PATH: &str = ".highscores";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u64,
}

impl HighScore {
    /// Parse one `name:score` line. The score follows the last colon.
    pub fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.trim_end().rsplit_once(':')?;
        let score = score.trim().parse().ok()?;
        Some(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// High score log backed by a file
#[derive(Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
}

impl HighScores {
    /// Use the file at `path`. Nothing is touched until the first read or write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, creating the file if needed
    pub fn add_high_score(&mut self, name: &str, score: u64) -> std::io::Result<()> {
        let name: String = name.chars().filter(|c| !matches!(c, ':' | '\n' | '\r')).collect();
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}:{}", name, score)?;
        log::info!("High score {} for {}", score, name);
        Ok(())
    }

    /// Top `limit` scores, highest first; equal scores order by name
    /// descending. A limit of 0 returns every record.
    pub fn get_high_scores(&self, limit: usize) -> Vec<HighScore> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let mut scores: Vec<HighScore> = text.lines().filter_map(HighScore::parse).collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.name.cmp(&a.name)));
        if limit > 0 {
            scores.truncate(limit);
        }
        scores
    }

    pub fn top_score(&self) -> Option<u64> {
        self.get_high_scores(1).first().map(|s| s.score)
    }

    /// Position a score would take on the board (1-indexed), if it makes
    /// the top `LEADERBOARD_SIZE`
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let board = self.get_high_scores(LEADERBOARD_SIZE);
        let rank = board.iter().position(|e| score > e.score).unwrap_or(board.len());
        (rank < LEADERBOARD_SIZE).then_some(rank + 1)
    }
}
