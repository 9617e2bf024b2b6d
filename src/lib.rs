//! Term Arcade - grid arcade games in the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, entities, collisions, arenas)
//! - `frame`: Snapshot of what to draw, plus the display trait
//! - `input`: Player intents and the input-source trait
//! - `driver`: Poll / tick / render loop
//! - `term`: crossterm display and keyboard
//! - `settings`: Data-driven tuning per variant

pub mod driver;
pub mod frame;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod term;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Points per food item, pellet or brick
    pub const ITEM_POINTS: u64 = 10;
    /// Segments added per food item
    pub const FOOD_GROWTH: usize = 1;

    /// Bonus item rewards (10x food)
    pub const BONUS_POINTS: u64 = 100;
    pub const BONUS_GROWTH: usize = 10;
    /// Edge length of the square bonus item
    pub const BONUS_SIZE: i32 = 3;
}
