//! Leaderboard rules and persistence
//!
//! The board keeps the best five results in rank order. Mutation goes
//! through [`Leaderboard::insert`]; the [`HighScoreStore`] moves whole
//! boards between memory and disk.

mod store;

pub use store::HighScoreStore;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Most entries the board keeps.
pub const MAX_ENTRIES: usize = 5;
/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 12;
/// Name recorded when the player submits nothing.
pub const DEFAULT_NAME: &str = "Anonymous";

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Why a submitted name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong,
}

/// Check a player name against the board rules without repairing it.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameError::TooLong);
    }
    Ok(())
}

/// One ranked result. `date` is local "%Y-%m-%d %H:%M" kept as a plain
/// string, so files written by older versions round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    #[serde(default = "default_name")]
    pub name: String,
    pub date: String,
}

impl HighScoreEntry {
    /// Entry stamped with the current wall-clock minute.
    pub fn now(name: &str, score: u32) -> Self {
        Self {
            score,
            name: name.to_string(),
            date: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// The top results, best first. Ties rank the older entry higher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current champion, if anyone has scored yet.
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Would `score` earn a slot right now? True while the board has
    /// room; once full, only scores strictly above the lowest qualify.
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries
            .iter()
            .map(|entry| entry.score)
            .min()
            .is_none_or(|lowest| score > lowest)
    }

    /// Place `entry` at its rank and drop anything past the cap.
    /// Returns whether the entry was retained.
    pub fn insert(&mut self, entry: HighScoreEntry) -> bool {
        let rank = self
            .entries
            .iter()
            .position(|other| {
                other.score < entry.score
                    || (other.score == entry.score && other.date > entry.date)
            })
            .unwrap_or(self.entries.len());

        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_ENTRIES);
        rank < MAX_ENTRIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32, date: &str) -> HighScoreEntry {
        HighScoreEntry {
            score,
            name: name.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn board_stays_sorted_by_score() {
        let mut board = Leaderboard::default();
        board.insert(entry("a", 50, "2026-01-01 10:00"));
        board.insert(entry("b", 150, "2026-01-02 10:00"));
        board.insert(entry("c", 100, "2026-01-03 10:00"));

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![150, 100, 50]);
        assert_eq!(board.best().unwrap().name, "b");
    }

    #[test]
    fn ties_rank_the_earlier_run_higher() {
        let mut board = Leaderboard::default();
        board.insert(entry("late", 100, "2026-01-05 10:00"));
        board.insert(entry("early", 100, "2026-01-01 10:00"));

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn board_never_exceeds_five_entries() {
        let mut board = Leaderboard::default();
        for (i, score) in [60, 50, 40, 30, 20].into_iter().enumerate() {
            assert!(board.insert(entry("p", score, &format!("2026-01-0{} 10:00", i + 1))));
        }

        assert!(board.insert(entry("new", 45, "2026-01-09 10:00")));
        assert_eq!(board.len(), 5);

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![60, 50, 45, 40, 30]);
    }

    #[test]
    fn insert_below_a_full_board_is_dropped() {
        let mut board = Leaderboard::default();
        for score in [60, 50, 40, 30, 20] {
            board.insert(entry("p", score, "2026-01-01 10:00"));
        }

        assert!(!board.insert(entry("low", 10, "2026-01-09 10:00")));
        assert_eq!(board.len(), 5);
        assert_eq!(board.entries().last().unwrap().score, 20);
    }

    #[test]
    fn any_score_qualifies_while_the_board_has_room() {
        let mut board = Leaderboard::default();
        assert!(board.qualifies(0));

        for score in [60, 50, 40, 30] {
            board.insert(entry("p", score, "2026-01-01 10:00"));
        }
        assert!(board.qualifies(0));
    }

    #[test]
    fn full_board_requires_beating_the_lowest() {
        let mut board = Leaderboard::default();
        for score in [60, 50, 40, 30, 20] {
            board.insert(entry("p", score, "2026-01-01 10:00"));
        }

        assert!(board.qualifies(21));
        assert!(!board.qualifies(20));
        assert!(!board.qualifies(0));
    }

    #[test]
    fn name_rules_reject_empty_and_oversized() {
        assert_eq!(validate_name("Ada"), Ok(()));
        assert_eq!(validate_name("  "), Err(NameError::Empty));
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("exactly12char"), Err(NameError::TooLong));
        assert_eq!(validate_name("exactly12cha"), Ok(()));
    }

    #[test]
    fn missing_name_field_falls_back_to_anonymous() {
        let parsed: HighScoreEntry =
            serde_json::from_str(r#"{"score": 70, "date": "2026-01-01 10:00"}"#).unwrap();
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(parsed.score, 70);
    }

    #[test]
    fn board_serializes_as_a_bare_array() {
        let mut board = Leaderboard::default();
        board.insert(entry("Ada", 120, "2026-01-01 10:00"));

        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with('['));

        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
