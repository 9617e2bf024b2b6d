//! Two-player pong: vertical paddles, open goal lines, first to `win_score`

use super::GameEvent;
use crate::input::Intent;
use crate::settings::PongSettings;
use crate::sim::collision::{BoundaryPolicy, Cause, Edge, Exits, Resolver};
use crate::sim::entity::{Ball, Entity, Paddle};
use crate::sim::grid::{Direction, Field, Heading, Position};
use crate::sim::lifecycle::Lifecycle;
use crate::sim::rng::RandomSource;

/// Which player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Player 1, w/s keys
    Left,
    /// Player 2, arrow keys
    Right,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PongArena {
    pub resolver: Resolver,
    /// Left, right
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Points per side, indexed by [`Side`]
    pub tallies: [u32; 2],
    pub win_score: u32,
}

impl PongArena {
    pub fn new(settings: &PongSettings) -> Self {
        let field = settings.field;
        let height = settings.paddle_height.clamp(1, field.height);
        let row = (field.height / 2).min(field.height - height);
        Self {
            resolver: Resolver::new(
                field,
                BoundaryPolicy::Reflect {
                    exits: Exits::SIDES,
                },
            ),
            paddles: [
                Paddle::new(Position::new(row, 1), height, Direction::Right),
                Paddle::new(Position::new(row, field.width - 2), height, Direction::Left),
            ],
            ball: Ball::new(field.center(), Heading::new(1, 1)),
            tallies: [0, 0],
            win_score: settings.win_score.max(1),
        }
    }

    pub fn field(&self) -> Field {
        self.resolver.field
    }

    pub fn tally(&self, side: Side) -> u32 {
        self.tallies[side.index()]
    }

    /// Paddles move one row per key press, on any tick
    pub fn apply_intent(&mut self, intent: Intent) {
        let (side, shift) = match intent {
            Intent::MoveUp => (Side::Right, -1),
            Intent::MoveDown => (Side::Right, 1),
            Intent::AltUp => (Side::Left, -1),
            Intent::AltDown => (Side::Left, 1),
            _ => return,
        };
        let paddle = &mut self.paddles[side.index()];
        if let Some(moved) = paddle.propose_motion(shift, &self.resolver.field) {
            *paddle = moved;
        }
    }

    pub fn step(
        &mut self,
        rng: &mut dyn RandomSource,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<GameEvent>,
    ) {
        let resolved = self.resolver.resolve_ball(&self.ball, &self.paddles, &[]);
        self.ball.pos = resolved.position;
        self.ball.heading = resolved.heading;

        let scorer = match resolved.exit {
            Some(Edge::Left) => Side::Right,
            Some(Edge::Right) => Side::Left,
            _ => return,
        };

        self.tallies[scorer.index()] += 1;
        events.push(GameEvent::PointScored(scorer));
        if scorer == Side::Left {
            lifecycle.award(1);
        }
        log::debug!(
            "{:?} scores, {} - {}",
            scorer,
            self.tally(Side::Left),
            self.tally(Side::Right)
        );

        if self.tally(scorer) >= self.win_score {
            match scorer {
                Side::Left => {
                    if lifecycle.win() {
                        events.push(GameEvent::Cleared);
                    }
                }
                Side::Right => {
                    if lifecycle.lose(Cause::Outscored) {
                        events.push(GameEvent::LifeLost(Cause::Outscored));
                    }
                }
            }
            return;
        }

        self.serve(rng);
    }

    /// Ball back to the centre with a random diagonal heading
    pub fn serve(&mut self, rng: &mut dyn RandomSource) {
        let mut sign = || if rng.below(2) == 0 { -1 } else { 1 };
        let heading = Heading::new(sign(), sign());
        self.ball = Ball::new(self.field().center(), heading);
    }

    pub fn entities(&self) -> Vec<Entity<'_>> {
        let mut out: Vec<Entity<'_>> = self.paddles.iter().map(Entity::Paddle).collect();
        out.push(Entity::Ball(&self.ball));
        out
    }

    pub fn status(&self, lifecycle: &Lifecycle) -> String {
        format!(
            "Player 1: {}   Player 2: {}   High Score: {}",
            self.tally(Side::Left),
            self.tally(Side::Right),
            lifecycle.high_score()
        )
    }
}
