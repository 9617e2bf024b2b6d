//! Game context: everything a run owns
//!
//! A single owned value holding the variant, settings, RNG, lifecycle and
//! the live arena. The tick driver takes it by `&mut`.

use std::fmt;

use super::arena::Arena;
use super::lifecycle::Lifecycle;
use super::rng::{RandomSource, SeededRng};
use crate::settings::{Cadence, Settings};

/// Which game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Variant {
    Snake,
    Maze,
    Breakout,
    Pong,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Snake,
        Variant::Maze,
        Variant::Breakout,
        Variant::Pong,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Variant::Snake => "Snake",
            Variant::Maze => "Maze Chase",
            Variant::Breakout => "Breakout",
            Variant::Pong => "Pong",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone)]
pub struct GameContext<R: RandomSource = SeededRng> {
    pub variant: Variant,
    pub settings: Settings,
    pub rng: R,
    pub lifecycle: Lifecycle,
    pub arena: Arena,
    /// Ticks since the current life started
    pub time_ticks: u64,
}

impl GameContext<SeededRng> {
    pub fn new(variant: Variant, settings: Settings, seed: u64) -> Self {
        Self::with_rng(variant, settings, SeededRng::new(seed))
    }
}

impl<R: RandomSource> GameContext<R> {
    pub fn with_rng(variant: Variant, settings: Settings, mut rng: R) -> Self {
        let arena = Arena::new(variant, &settings, &mut rng);
        Self {
            variant,
            settings,
            rng,
            lifecycle: Lifecycle::new(),
            arena,
            time_ticks: 0,
        }
    }

    pub fn cadence(&self) -> Cadence {
        match self.variant {
            Variant::Snake => self.settings.snake.cadence,
            Variant::Maze => self.settings.maze.cadence,
            Variant::Breakout => self.settings.breakout.cadence,
            Variant::Pong => self.settings.pong.cadence,
        }
    }

    /// Start a new life. Only valid from a terminal phase; the high score
    /// and leaderboard carry over.
    pub fn restart(&mut self) -> bool {
        if !self.lifecycle.restart() {
            return false;
        }
        self.arena = Arena::new(self.variant, &self.settings, &mut self.rng);
        self.time_ticks = 0;
        log::info!("{} life {} started", self.variant, self.lifecycle.life());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Cause;
    use crate::sim::lifecycle::GamePhase;

    #[test]
    fn test_new_context() {
        let ctx = GameContext::new(Variant::Breakout, Settings::default(), 42);
        assert_eq!(ctx.lifecycle.phase(), GamePhase::Playing);
        assert_eq!(ctx.cadence(), Cadence::new(30, 3));
        assert_eq!(ctx.rng.seed(), 42);
        assert_eq!(ctx.time_ticks, 0);
    }

    #[test]
    fn test_restart_requires_terminal_phase() {
        let mut ctx = GameContext::new(Variant::Maze, Settings::default(), 1);
        assert!(!ctx.restart());

        ctx.lifecycle.award(40);
        ctx.lifecycle.lose(Cause::Actor);
        ctx.time_ticks = 99;
        assert!(ctx.restart());
        assert_eq!(ctx.lifecycle.phase(), GamePhase::Playing);
        assert_eq!(ctx.lifecycle.score(), 0);
        assert_eq!(ctx.lifecycle.high_score(), 40);
        assert_eq!(ctx.time_ticks, 0);
    }

    #[test]
    fn test_variant_titles() {
        assert_eq!(Variant::Maze.to_string(), "Maze Chase");
    }
}
