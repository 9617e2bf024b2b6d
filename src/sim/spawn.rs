//! Timed bonus-item spawning
//!
//! At most one bonus is live at a time. A roll happens on every
//! `schedule_bonus` call; on success the item lands on a uniformly random
//! free square and counts down once per tick until it is eaten or expires.

use super::entity::BonusItem;
use super::grid::{Field, Position};
use super::rng::RandomSource;

/// Spawn tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRule {
    /// Probability of a spawn per roll, as `1 / one_in`
    pub one_in: u32,
    /// Starting countdown of a fresh item, in ticks
    pub lifetime: u32,
    /// Ticks after an item disappears before another may spawn
    pub cooldown: u32,
    /// Edge length of the square item
    pub size: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusSpawner {
    rule: SpawnRule,
    active: Option<BonusItem>,
    cooldown_left: u32,
}

impl BonusSpawner {
    pub fn new(rule: SpawnRule) -> Self {
        Self {
            rule,
            active: None,
            cooldown_left: 0,
        }
    }

    pub fn rule(&self) -> SpawnRule {
        self.rule
    }

    pub fn active(&self) -> Option<&BonusItem> {
        self.active.as_ref()
    }

    pub fn cooldown_left(&self) -> u32 {
        self.cooldown_left
    }

    /// Roll for a new bonus. Returns the placed item, if any.
    ///
    /// Nothing is rolled while an item is live or the cooldown is running.
    /// `occupied` marks cells the item may not cover.
    pub fn schedule_bonus(
        &mut self,
        rng: &mut dyn RandomSource,
        field: &Field,
        occupied: impl Fn(Position) -> bool,
    ) -> Option<BonusItem> {
        if self.active.is_some() || self.cooldown_left > 0 {
            return None;
        }
        if !rng.chance(self.rule.one_in) {
            return None;
        }

        let size = self.rule.size;
        let origins: Vec<Position> = field
            .cells()
            .filter(|o| o.row + size <= field.height && o.col + size <= field.width)
            .filter(|&o| {
                BonusItem::new(o, size, 1)
                    .cells()
                    .all(|cell| !occupied(cell))
            })
            .collect();
        if origins.is_empty() {
            log::debug!("no room for a bonus item");
            return None;
        }

        let origin = origins[rng.below(origins.len())];
        let item = BonusItem::new(origin, size, self.rule.lifetime.max(1));
        self.active = Some(item);
        Some(item)
    }

    /// Count down one tick. Returns the item if it just expired.
    pub fn tick(&mut self) -> Option<BonusItem> {
        match self.active.as_mut() {
            Some(item) => {
                item.timer = item.timer.saturating_sub(1);
                if item.timer == 0 {
                    let expired = self.active.take();
                    self.cooldown_left = self.rule.cooldown;
                    expired
                } else {
                    None
                }
            }
            None => {
                self.cooldown_left = self.cooldown_left.saturating_sub(1);
                None
            }
        }
    }

    /// Remove the live item because it was eaten
    pub fn take(&mut self) -> Option<BonusItem> {
        let taken = self.active.take();
        if taken.is_some() {
            self.cooldown_left = self.rule.cooldown;
        }
        taken
    }
}
