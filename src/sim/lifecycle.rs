//! Score and life-cycle state machine
//!
//! ```text
//! Playing --(crash / caught / outscored)--> GameOver
//! Playing --(field cleared / match won)---> Won
//! GameOver | Won --(restart)--------------> Playing
//! ```
//!
//! The high score is updated in the same call that changes the score.

use super::collision::Cause;
use crate::highscores::{Finish, HighScores};

/// Current phase of a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Score for the current life plus the best seen this run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: u64,
    high_score: u64,
}

impl Scoreboard {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn add(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Zero the score, keep the high score
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifecycle {
    phase: GamePhase,
    board: Scoreboard,
    /// 1-based
    life: u32,
    last_cause: Option<Cause>,
    leaderboard: HighScores,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Playing,
            board: Scoreboard::default(),
            life: 1,
            last_cause: None,
            leaderboard: HighScores::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.board.score()
    }

    pub fn high_score(&self) -> u64 {
        self.board.high_score()
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn last_cause(&self) -> Option<Cause> {
        self.last_cause
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Add points. Ignored outside `Playing`.
    pub fn award(&mut self, points: u64) {
        if self.phase == GamePhase::Playing {
            self.board.add(points);
        }
    }

    /// End the life. Returns false if it had already ended.
    pub fn lose(&mut self, cause: Cause) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.last_cause = Some(cause);
        self.leaderboard
            .add_score(self.board.score(), self.life, Finish::Lost);
        log::info!(
            "life {} lost ({:?}) with {} points, high score {}",
            self.life,
            cause,
            self.board.score(),
            self.board.high_score()
        );
        true
    }

    /// Win the life. Returns false if it had already ended.
    pub fn win(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Won;
        self.leaderboard
            .add_score(self.board.score(), self.life, Finish::Won);
        log::info!(
            "life {} won with {} points, high score {}",
            self.life,
            self.board.score(),
            self.board.high_score()
        );
        true
    }

    /// Back to `Playing` with a zero score. Only valid from a terminal phase.
    pub fn restart(&mut self) -> bool {
        if !self.phase.is_terminal() {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.board.reset();
        self.last_cause = None;
        self.life += 1;
        true
    }
}
