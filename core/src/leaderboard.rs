use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many entries are surfaced for display.
pub const DISPLAY_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write leaderboard: {0}")]
    Write(#[from] io::Error),
}

/// One completed game, as persisted: `MM:SS,PlayerName`.
///
/// Minutes and seconds are independent two-digit fields; times past 99:59 are
/// clamped so the text format stays fixed-width.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    minutes: u8,
    seconds: u8,
    name: String,
}

impl ScoreEntry {
    pub fn from_secs(elapsed_secs: u64, name: impl Into<String>) -> Self {
        let clamped = elapsed_secs.min(99 * 60 + 59);
        Self {
            minutes: (clamped / 60) as u8,
            seconds: (clamped % 60) as u8,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Ranking key: minutes first, then seconds.
    fn time_key(&self) -> (u8, u8) {
        (self.minutes, self.seconds)
    }

    fn parse_line(line: &str) -> Option<Self> {
        let (time, name) = line.split_once(',')?;
        let (minutes, seconds) = time.split_once(':')?;
        if name.is_empty() {
            return None;
        }
        let minutes = minutes.parse().ok()?;
        let seconds: u8 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        Some(Self {
            minutes,
            seconds,
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02},{}", self.minutes, self.seconds, self.name)
    }
}

/// Display row: rank plus whether the entry belongs to the active player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRow<'a> {
    pub rank: usize,
    pub entry: &'a ScoreEntry,
    pub is_current: bool,
}

/// Best completion times, ascending by time, ties in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one entry per line, skipping anything malformed.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let parsed = ScoreEntry::parse_line(line);
                if parsed.is_none() {
                    log::warn!("skipping malformed leaderboard line: {line:?}");
                }
                parsed
            })
            .collect();
        Self { entries }
    }

    /// Missing or unreadable files are treated as an empty leaderboard, never
    /// as a fatal error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::parse(&text),
            Err(err) => {
                log::info!(
                    "leaderboard at {} not readable ({err}), starting empty",
                    path.as_ref().display()
                );
                Self::new()
            }
        }
    }

    /// Rewrites the whole file in persisted order.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        fs::write(path, self.render())?;
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }

    /// Inserts immediately before the first strictly slower entry, so equal
    /// times keep their existing order.
    pub fn insert(&mut self, entry: ScoreEntry) {
        let position = self
            .entries
            .iter()
            .position(|existing| existing.time_key() > entry.time_key())
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The top entries as ranked display rows. Matching is by name only, so
    /// two players sharing a name are both marked as current.
    pub fn display_rows<'a>(&'a self, current_player: &str) -> Vec<ScoreRow<'a>> {
        self.top(DISPLAY_LIMIT)
            .iter()
            .enumerate()
            .map(|(i, entry)| ScoreRow {
                rank: i + 1,
                entry,
                is_current: entry.name == current_player,
            })
            .collect()
    }
}
