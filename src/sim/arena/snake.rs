//! Growth snake: food, timed 3x3 bonus, self-collision

use super::GameEvent;
use crate::consts::BONUS_SIZE;
use crate::input::Intent;
use crate::settings::SnakeSettings;
use crate::sim::collision::{BoundaryPolicy, ChainOutcome, ItemHit, Resolver};
use crate::sim::entity::{Entity, Obstacle, ObstacleKind, Snake};
use crate::sim::grid::{Direction, Field, Position};
use crate::sim::lifecycle::Lifecycle;
use crate::sim::rng::RandomSource;
use crate::sim::spawn::{BonusSpawner, SpawnRule};

/// Starting body length
pub const START_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeArena {
    pub resolver: Resolver,
    pub snake: Snake,
    /// `None` only once the field is full
    pub food: Option<Obstacle>,
    pub spawner: BonusSpawner,
}

impl SnakeArena {
    pub fn new(settings: &SnakeSettings, rng: &mut dyn RandomSource) -> Self {
        let field = settings.field;
        let snake = Snake::new(field.center(), Direction::Right, START_LENGTH);
        let mut arena = Self::with_snake(field, snake, None, settings);
        arena.place_food(rng);
        arena
    }

    /// Arena around a given snake and food cell
    pub fn with_snake(
        field: Field,
        snake: Snake,
        food: Option<Position>,
        settings: &SnakeSettings,
    ) -> Self {
        let rule = SpawnRule {
            one_in: settings.bonus_one_in,
            lifetime: settings.bonus_lifetime_ticks,
            cooldown: settings.bonus_cooldown_ticks,
            size: BONUS_SIZE,
        };
        Self {
            resolver: Resolver::new(field, BoundaryPolicy::Terminate),
            snake,
            food: food.map(|pos| Obstacle::new(pos, ObstacleKind::Food)),
            spawner: BonusSpawner::new(rule),
        }
    }

    pub fn field(&self) -> Field {
        self.resolver.field
    }

    pub fn apply_intent(&mut self, intent: Intent) {
        if let Some(dir) = intent.direction() {
            // A reversal is dropped without a trace
            self.snake.steer(dir);
        }
    }

    pub fn step(
        &mut self,
        rng: &mut dyn RandomSource,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<GameEvent>,
    ) {
        let candidate = self.snake.propose_motion();
        let outcome = self.resolver.resolve_chain(
            &self.snake,
            candidate,
            self.food.map(|f| f.pos),
            self.spawner.active(),
        );

        match outcome {
            ChainOutcome::Crash(cause) => {
                if lifecycle.lose(cause) {
                    events.push(GameEvent::LifeLost(cause));
                }
            }
            ChainOutcome::Advance => {
                self.snake.advance(candidate);
                self.snake.retract_tail();
            }
            ChainOutcome::Consume {
                item,
                points,
                growth,
            } => {
                self.snake.advance(candidate);
                self.snake.grow(growth);
                self.snake.retract_tail();
                lifecycle.award(points);
                events.push(GameEvent::ItemEaten { points, growth });

                match item {
                    ItemHit::Food => {
                        if !self.place_food(rng) {
                            if lifecycle.win() {
                                events.push(GameEvent::Cleared);
                            }
                            return;
                        }
                        let field = self.field();
                        let (snake, food) = (&self.snake, self.food);
                        let placed = self.spawner.schedule_bonus(rng, &field, |cell| {
                            snake.occupies(cell) || food.is_some_and(|f| f.pos == cell)
                        });
                        if let Some(bonus) = placed {
                            events.push(GameEvent::BonusSpawned(bonus.origin));
                        }
                    }
                    ItemHit::Bonus => {
                        self.spawner.take();
                    }
                }
            }
        }
    }

    /// Count down the bonus item
    pub fn tick_timers(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(expired) = self.spawner.tick() {
            events.push(GameEvent::BonusExpired(expired.origin));
        }
    }

    /// Put food on a uniformly random free cell. False if none is left.
    pub fn place_food(&mut self, rng: &mut dyn RandomSource) -> bool {
        let bonus = self.spawner.active().copied();
        let free: Vec<Position> = self
            .field()
            .cells()
            .filter(|&cell| !self.snake.occupies(cell))
            .filter(|&cell| !bonus.is_some_and(|b| b.covers(cell)))
            .collect();
        if free.is_empty() {
            self.food = None;
            return false;
        }
        let pos = free[rng.below(free.len())];
        self.food = Some(Obstacle::new(pos, ObstacleKind::Food));
        true
    }

    pub fn entities(&self) -> Vec<Entity<'_>> {
        let mut out = Vec::with_capacity(3);
        if let Some(food) = &self.food {
            out.push(Entity::Obstacle(food));
        }
        if let Some(bonus) = self.spawner.active() {
            out.push(Entity::Bonus(bonus));
        }
        out.push(Entity::Snake(&self.snake));
        out
    }

    pub fn status(&self, lifecycle: &Lifecycle) -> String {
        format!(
            "Score: {}   High Score: {}   Length: {}",
            lifecycle.score(),
            lifecycle.high_score(),
            self.snake.len()
        )
    }
}
