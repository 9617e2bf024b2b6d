//! Game settings
//!
//! One section per variant. Loaded from an optional JSON file; anything
//! missing falls back to the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::grid::Field;

/// Smallest field any variant is allowed to run on
pub const MIN_FIELD: Field = Field::new(12, 24);
/// Largest field a terminal can reasonably show
pub const MAX_FIELD: Field = Field::new(256, 512);

/// Input-poll timeout and movement rate-divide for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    /// Upper bound on each input poll, in milliseconds
    pub poll_timeout_ms: u64,
    /// Actors move on every Nth tick
    pub motion_divisor: u32,
}

impl Cadence {
    pub const fn new(poll_timeout_ms: u64, motion_divisor: u32) -> Self {
        Self {
            poll_timeout_ms,
            motion_divisor,
        }
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// True if actors move on tick number `tick` (0-based)
    pub fn is_motion_tick(&self, tick: u64) -> bool {
        tick % u64::from(self.motion_divisor.max(1)) == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub cadence: Cadence,
    pub field: Field,
    /// Chance of a bonus per food eaten, as `1 / bonus_one_in`
    pub bonus_one_in: u32,
    pub bonus_lifetime_ticks: u32,
    pub bonus_cooldown_ticks: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            cadence: Cadence::new(100, 1),
            field: Field::new(22, 60),
            bonus_one_in: 4,
            bonus_lifetime_ticks: 200,
            bonus_cooldown_ticks: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    pub cadence: Cadence,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            cadence: Cadence::new(100, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutSettings {
    pub cadence: Cadence,
    pub field: Field,
    pub paddle_width: i32,
    /// Cells per paddle move
    pub paddle_step: i32,
    pub brick_rows: i32,
    pub brick_columns: i32,
}

impl Default for BreakoutSettings {
    fn default() -> Self {
        Self {
            cadence: Cadence::new(30, 3),
            field: Field::new(24, 80),
            paddle_width: 20,
            paddle_step: 2,
            brick_rows: 5,
            brick_columns: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongSettings {
    pub cadence: Cadence,
    pub field: Field,
    pub paddle_height: i32,
    /// Points needed to take the match
    pub win_score: u32,
}

impl Default for PongSettings {
    fn default() -> Self {
        Self {
            cadence: Cadence::new(30, 2),
            field: Field::new(24, 80),
            paddle_height: 5,
            win_score: 5,
        }
    }
}

/// All variant settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed; a random one is drawn when absent
    pub seed: Option<u64>,
    pub snake: SnakeSettings,
    pub maze: MazeSettings,
    pub breakout: BreakoutSettings,
    pub pong: PongSettings,
}

impl Settings {
    /// Parse settings from JSON and sanitize them
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Clamp values the simulation cannot run with
    pub fn sanitize(&mut self) {
        for (name, cadence) in [
            ("snake", &mut self.snake.cadence),
            ("maze", &mut self.maze.cadence),
            ("breakout", &mut self.breakout.cadence),
            ("pong", &mut self.pong.cadence),
        ] {
            if cadence.motion_divisor == 0 {
                log::warn!("{name}: motion_divisor 0 raised to 1");
                cadence.motion_divisor = 1;
            }
            if cadence.poll_timeout_ms == 0 {
                log::warn!("{name}: poll_timeout_ms 0 raised to 1");
                cadence.poll_timeout_ms = 1;
            }
        }

        for (name, field) in [
            ("snake", &mut self.snake.field),
            ("breakout", &mut self.breakout.field),
            ("pong", &mut self.pong.field),
        ] {
            if field.height < MIN_FIELD.height || field.width < MIN_FIELD.width {
                log::warn!(
                    "{name}: field {}x{} raised to at least {}x{}",
                    field.height,
                    field.width,
                    MIN_FIELD.height,
                    MIN_FIELD.width
                );
                field.height = field.height.max(MIN_FIELD.height);
                field.width = field.width.max(MIN_FIELD.width);
            }
            if field.height > MAX_FIELD.height || field.width > MAX_FIELD.width {
                log::warn!(
                    "{name}: field {}x{} lowered to at most {}x{}",
                    field.height,
                    field.width,
                    MAX_FIELD.height,
                    MAX_FIELD.width
                );
                field.height = field.height.min(MAX_FIELD.height);
                field.width = field.width.min(MAX_FIELD.width);
            }
        }

        let snake = &mut self.snake;
        snake.bonus_one_in = snake.bonus_one_in.max(1);
        snake.bonus_lifetime_ticks = snake.bonus_lifetime_ticks.max(1);

        let breakout = &mut self.breakout;
        breakout.paddle_width = breakout.paddle_width.clamp(1, breakout.field.width);
        breakout.paddle_step = breakout.paddle_step.max(1);
        breakout.brick_rows = breakout.brick_rows.clamp(1, breakout.field.height - 8);
        breakout.brick_columns = breakout.brick_columns.clamp(1, breakout.field.width - 4);

        let pong = &mut self.pong;
        pong.paddle_height = pong.paddle_height.clamp(1, pong.field.height - 2);
        pong.win_score = pong.win_score.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadences() {
        let settings = Settings::default();
        assert_eq!(settings.snake.cadence, Cadence::new(100, 1));
        assert_eq!(settings.breakout.cadence, Cadence::new(30, 3));
        assert_eq!(settings.snake.bonus_lifetime_ticks, 200);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "pong": { "win_score": 3 } }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.pong.win_score, 3);
        assert_eq!(settings.pong.paddle_height, 5);
        assert_eq!(settings.snake, SnakeSettings::default());
    }

    #[test]
    fn test_sanitize_clamps() {
        let json = r#"{
            "snake": { "cadence": { "poll_timeout_ms": 0, "motion_divisor": 0 },
                       "field": { "height": 3, "width": 4 }, "bonus_one_in": 0 }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.snake.cadence, Cadence::new(1, 1));
        assert_eq!(settings.snake.field, MIN_FIELD);
        assert_eq!(settings.snake.bonus_one_in, 1);
    }

    #[test]
    fn test_sanitize_caps_huge_field() {
        let json = r#"{ "snake": { "field": { "height": 50000, "width": 50000 } },
                        "pong": { "field": { "height": 40, "width": 9000 } } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.snake.field, MAX_FIELD);
        assert_eq!(settings.pong.field, Field::new(40, MAX_FIELD.width));
        assert!(settings.snake.field.area() <= MAX_FIELD.area());
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = Settings::default();
        assert_eq!(Settings::from_json(&settings.to_json()).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/term-arcade.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_motion_ticks() {
        let cadence = Cadence::new(30, 3);
        let moves: Vec<u64> = (0..7).filter(|&t| cadence.is_motion_tick(t)).collect();
        assert_eq!(moves, vec![0, 3, 6]);
    }
}
