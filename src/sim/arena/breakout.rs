//! Breakout: paddle, one ball, a wall of bricks, an open floor

use super::GameEvent;
use crate::input::Intent;
use crate::settings::BreakoutSettings;
use crate::sim::collision::{BoundaryPolicy, Cause, Exits, Resolver, remove_consumed};
use crate::sim::entity::{Ball, Entity, Obstacle, ObstacleKind, Paddle};
use crate::sim::grid::{Direction, Field, Heading, Position};
use crate::sim::lifecycle::Lifecycle;

/// First row of bricks
pub const BRICK_TOP_ROW: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakoutArena {
    pub resolver: Resolver,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Obstacle>,
    /// Cells per paddle move
    pub paddle_step: i32,
}

impl BreakoutArena {
    pub fn new(settings: &BreakoutSettings) -> Self {
        let field = settings.field;
        let width = settings.paddle_width.clamp(1, field.width);
        let paddle = Paddle::new(
            Position::new(field.height - 2, (field.width / 2).min(field.width - width)),
            width,
            Direction::Up,
        );
        let ball = Ball::new(
            Position::new(field.height - 3, field.width / 2),
            Heading::new(-1, -1),
        );
        let bricks = brick_wall(field, settings.brick_rows, settings.brick_columns);
        Self {
            resolver: Resolver::new(
                field,
                BoundaryPolicy::Reflect {
                    exits: Exits::FLOOR,
                },
            ),
            paddle,
            ball,
            bricks,
            paddle_step: settings.paddle_step.max(1),
        }
    }

    pub fn field(&self) -> Field {
        self.resolver.field
    }

    /// Paddle input applies immediately, not only on motion ticks
    pub fn apply_intent(&mut self, intent: Intent) {
        let shift = match intent {
            Intent::MoveLeft => -self.paddle_step,
            Intent::MoveRight => self.paddle_step,
            _ => return,
        };
        if let Some(moved) = self.paddle.propose_motion(shift, &self.resolver.field) {
            self.paddle = moved;
        }
    }

    pub fn step(&mut self, lifecycle: &mut Lifecycle, events: &mut Vec<GameEvent>) {
        let resolved = self
            .resolver
            .resolve_ball(&self.ball, std::slice::from_ref(&self.paddle), &self.bricks);
        self.ball.pos = resolved.position;
        self.ball.heading = resolved.heading;

        if resolved.exit.is_some() {
            if lifecycle.lose(Cause::Boundary) {
                events.push(GameEvent::LifeLost(Cause::Boundary));
            }
            return;
        }

        let hit: Vec<Position> = resolved
            .destroyed
            .iter()
            .filter_map(|&i| self.bricks.get(i).map(|b| b.pos))
            .collect();
        if remove_consumed(&mut self.bricks, resolved.destroyed) > 0 {
            lifecycle.award(resolved.points);
            events.extend(hit.into_iter().map(GameEvent::BrickDestroyed));
            if self.bricks.is_empty() && lifecycle.win() {
                events.push(GameEvent::Cleared);
            }
        }
    }

    pub fn entities(&self) -> Vec<Entity<'_>> {
        let mut out: Vec<Entity<'_>> = self.bricks.iter().map(Entity::Obstacle).collect();
        out.push(Entity::Paddle(&self.paddle));
        out.push(Entity::Ball(&self.ball));
        out
    }

    pub fn status(&self, lifecycle: &Lifecycle) -> String {
        format!(
            "Score: {}   High Score: {}   Bricks: {}",
            lifecycle.score(),
            lifecycle.high_score(),
            self.bricks.len()
        )
    }
}

/// `rows` x `columns` bricks spread across the field from row 2
fn brick_wall(field: Field, rows: i32, columns: i32) -> Vec<Obstacle> {
    let columns = columns.max(1);
    let spacing = ((field.width - 4) / columns).max(1);
    (0..rows.max(0))
        .flat_map(|r| {
            (0..columns).map(move |c| {
                Obstacle::new(
                    Position::new(BRICK_TOP_ROW + r, c * spacing + 2),
                    ObstacleKind::Brick,
                )
            })
        })
        .filter(|b| field.contains(b.pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lifecycle::GamePhase;

    fn arena() -> BreakoutArena {
        BreakoutArena::new(&BreakoutSettings::default())
    }

    #[test]
    fn test_initial_layout() {
        let arena = arena();
        assert_eq!(arena.bricks.len(), 50);
        assert_eq!(arena.bricks[0].pos, Position::new(2, 2));
        assert_eq!(arena.paddle.anchor, Position::new(22, 40));
        assert_eq!(arena.paddle.len, 20);
        assert_eq!(arena.ball.pos, Position::new(21, 40));
        assert_eq!(arena.ball.heading, Heading::new(-1, -1));
    }

    #[test]
    fn test_paddle_moves_and_stops_at_edge() {
        let mut arena = arena();
        arena.apply_intent(Intent::MoveLeft);
        assert_eq!(arena.paddle.anchor.col, 38);
        arena.apply_intent(Intent::MoveUp);
        assert_eq!(arena.paddle.anchor.col, 38);

        arena.paddle.anchor.col = 60;
        arena.apply_intent(Intent::MoveRight);
        assert_eq!(arena.paddle.anchor.col, 60);
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut arena = arena();
        arena.ball = Ball::new(Position::new(7, 3), Heading::new(-1, -1));
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.step(&mut lifecycle, &mut events);
        assert_eq!(arena.bricks.len(), 49);
        assert_eq!(lifecycle.score(), 10);
        assert_eq!(arena.ball.heading, Heading::new(1, -1));
        assert_eq!(events, vec![GameEvent::BrickDestroyed(Position::new(6, 2))]);
    }

    #[test]
    fn test_paddle_bounce() {
        let mut arena = arena();
        arena.ball = Ball::new(Position::new(20, 45), Heading::new(1, 1));
        arena.step(&mut Lifecycle::new(), &mut Vec::new());
        assert_eq!(arena.ball.pos, Position::new(21, 46));
        assert_eq!(arena.ball.heading, Heading::new(-1, 1));
    }

    #[test]
    fn test_floor_ends_life() {
        let mut arena = arena();
        arena.ball = Ball::new(Position::new(22, 5), Heading::new(1, 1));
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.step(&mut lifecycle, &mut events);
        assert_eq!(lifecycle.phase(), GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::LifeLost(Cause::Boundary)]);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut arena = arena();
        arena.bricks = vec![Obstacle::new(Position::new(6, 2), ObstacleKind::Brick)];
        arena.ball = Ball::new(Position::new(7, 3), Heading::new(-1, -1));
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.step(&mut lifecycle, &mut events);
        assert_eq!(lifecycle.phase(), GamePhase::Won);
        assert_eq!(events.last(), Some(&GameEvent::Cleared));
    }
}
