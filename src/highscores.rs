//! Session leaderboard
//!
//! Keeps the best finished lives of this run in memory. Nothing is written
//! to disk.

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// How a recorded life ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Lost,
    Won,
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub score: u64,
    /// 1-based life number within the run
    pub life: u32,
    pub finish: Finish,
}

/// Leaderboard sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A life scores onto the board if it earned anything and the board
    /// has room or it beats the current last place
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && self
                .entries
                .get(MAX_HIGH_SCORES - 1)
                .is_none_or(|last| score > last.score)
    }

    /// Record a finished life and return its 1-based rank, or `None` if it
    /// did not make the board. Ties keep the earlier life ahead.
    pub fn add_score(&mut self, score: u64, life: u32, finish: Finish) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let at = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            at,
            HighScoreEntry {
                score,
                life,
                finish,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(at + 1)
    }

    /// Lives on the board that ended by winning
    pub fn wins(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.finish == Finish::Won)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// One short line per entry, best first
    pub fn lines(&self, limit: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, e)| {
                let mark = match e.finish {
                    Finish::Won => " (won)",
                    Finish::Lost => "",
                };
                format!("{}. {} - life {}{}", i + 1, e.score, e.life, mark)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1, Finish::Lost), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_insert_and_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(30, 1, Finish::Lost), Some(1));
        assert_eq!(scores.add_score(50, 2, Finish::Won), Some(1));
        assert_eq!(scores.add_score(30, 3, Finish::Lost), Some(3));
        assert_eq!(scores.top_score(), Some(50));
        assert_eq!(scores.entries[1].life, 1);
        assert_eq!(scores.lines(1), vec!["1. 50 - life 2 (won)".to_string()]);
    }

    #[test]
    fn test_full_board_needs_a_better_score() {
        let mut scores = HighScores::new();
        for life in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(20, life, Finish::Lost);
        }
        assert_eq!(scores.add_score(20, 11, Finish::Won), None);
        assert_eq!(scores.wins(), 0);
        assert_eq!(scores.add_score(21, 12, Finish::Won), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.life), Some(9));
        assert_eq!(scores.wins(), 1);
    }

    #[test]
    fn test_truncates_to_max() {
        let mut scores = HighScores::new();
        for i in 1..=(MAX_HIGH_SCORES as u64 + 5) {
            scores.add_score(i * 10, i as u32, Finish::Lost);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(10));
        assert_eq!(scores.top_score(), Some((MAX_HIGH_SCORES as u64 + 5) * 10));
    }
}
