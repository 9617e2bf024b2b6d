//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick cadence only
//! - Injected RNG only
//! - Stable iteration order (insertion order of entity lists)
//! - No terminal or platform dependencies

pub mod arena;
pub mod collision;
pub mod entity;
pub mod grid;
pub mod lifecycle;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, GameEvent, Side};
pub use collision::{BoundaryPolicy, Cause, Resolver};
pub use entity::Entity;
pub use grid::{Direction, Field, Heading, Position};
pub use lifecycle::{GamePhase, Lifecycle};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use state::{GameContext, Variant};
pub use tick::tick;
