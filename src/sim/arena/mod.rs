//! Per-variant arenas
//!
//! Each arena owns its entities and a [`Resolver`](super::collision::Resolver)
//! configured for its rules. The tick driver calls into the arena through
//! [`Arena`], which is a closed set of variants.

pub mod breakout;
pub mod maze;
pub mod pong;
pub mod snake;

pub use breakout::BreakoutArena;
pub use maze::MazeArena;
pub use pong::{PongArena, Side};
pub use snake::SnakeArena;

use super::collision::Cause;
use super::entity::Entity;
use super::grid::{Field, Position};
use super::lifecycle::Lifecycle;
use super::rng::RandomSource;
use super::state::Variant;
use crate::input::Intent;
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ItemEaten { points: u64, growth: usize },
    BonusSpawned(Position),
    BonusExpired(Position),
    PelletEaten(Position),
    BrickDestroyed(Position),
    PointScored(Side),
    LifeLost(Cause),
    /// Field cleared or match won
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arena {
    Snake(SnakeArena),
    Maze(MazeArena),
    Breakout(BreakoutArena),
    Pong(PongArena),
}

impl Arena {
    /// Fresh arena for a new life
    pub fn new(variant: Variant, settings: &Settings, rng: &mut dyn RandomSource) -> Self {
        match variant {
            Variant::Snake => Arena::Snake(SnakeArena::new(&settings.snake, rng)),
            Variant::Maze => Arena::Maze(MazeArena::new()),
            Variant::Breakout => Arena::Breakout(BreakoutArena::new(&settings.breakout)),
            Variant::Pong => Arena::Pong(PongArena::new(&settings.pong)),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Arena::Snake(_) => Variant::Snake,
            Arena::Maze(_) => Variant::Maze,
            Arena::Breakout(_) => Variant::Breakout,
            Arena::Pong(_) => Variant::Pong,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Arena::Snake(a) => a.field(),
            Arena::Maze(a) => a.field(),
            Arena::Breakout(a) => a.field(),
            Arena::Pong(a) => a.field(),
        }
    }

    /// Route a movement intent. Quit and Restart are handled by the caller.
    pub fn apply_intent(&mut self, intent: Intent) {
        match self {
            Arena::Snake(a) => a.apply_intent(intent),
            Arena::Maze(a) => a.apply_intent(intent),
            Arena::Breakout(a) => a.apply_intent(intent),
            Arena::Pong(a) => a.apply_intent(intent),
        }
    }

    /// One motion step: propose, resolve, commit
    pub fn step(
        &mut self,
        rng: &mut dyn RandomSource,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<GameEvent>,
    ) {
        match self {
            Arena::Snake(a) => a.step(rng, lifecycle, events),
            Arena::Maze(a) => a.step(rng, lifecycle, events),
            Arena::Breakout(a) => a.step(lifecycle, events),
            Arena::Pong(a) => a.step(rng, lifecycle, events),
        }
    }

    /// Per-tick timers, run on every tick whether or not actors moved
    pub fn tick_timers(&mut self, events: &mut Vec<GameEvent>) {
        if let Arena::Snake(a) = self {
            a.tick_timers(events);
        }
    }

    pub fn entities(&self) -> Vec<Entity<'_>> {
        match self {
            Arena::Snake(a) => a.entities(),
            Arena::Maze(a) => a.entities(),
            Arena::Breakout(a) => a.entities(),
            Arena::Pong(a) => a.entities(),
        }
    }

    /// Status line text for the top row
    pub fn status(&self, lifecycle: &Lifecycle) -> String {
        match self {
            Arena::Snake(a) => a.status(lifecycle),
            Arena::Maze(a) => a.status(lifecycle),
            Arena::Breakout(a) => a.status(lifecycle),
            Arena::Pong(a) => a.status(lifecycle),
        }
    }
}
