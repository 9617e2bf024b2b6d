//! Collision resolution on the cell grid
//!
//! Pure functions from (committed state, candidate motion) to a resolved
//! motion plus side effects. Rules run in a fixed order and the first
//! terminal or destructive rule wins for that actor this tick:
//!
//! 1. boundary (field edge or wall cell)
//! 2. static obstacles (bricks, pellets)
//! 3. self / adversarial actors
//! 4. consumables (food, bonus items)
//!
//! Nothing here mutates entities. Consumed obstacles come back as indices
//! and are removed by [`remove_consumed`] after the scan.

use std::collections::HashSet;

use super::entity::{Ball, BonusItem, Obstacle, Paddle, Pursuer, Snake};
use super::grid::{Field, Heading, Position};
use crate::consts::{BONUS_GROWTH, BONUS_POINTS, FOOD_GROWTH, ITEM_POINTS};

/// Field edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Edges a ball leaves through instead of bouncing off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Exits {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Exits {
    pub const NONE: Exits = Exits {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };
    pub const ALL: Exits = Exits {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };
    /// Breakout: the floor is open
    pub const FLOOR: Exits = Exits {
        bottom: true,
        ..Exits::NONE
    };
    /// Pong: both goal lines are open
    pub const SIDES: Exits = Exits {
        left: true,
        right: true,
        ..Exits::NONE
    };
}

/// What happens when an actor meets the field boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Leaving the field ends the life
    Terminate,
    /// Ball-type actors bounce; `exits` lists the edges that do not bounce
    Reflect { exits: Exits },
}

impl BoundaryPolicy {
    fn exits(&self) -> Exits {
        match self {
            BoundaryPolicy::Terminate => Exits::ALL,
            BoundaryPolicy::Reflect { exits } => *exits,
        }
    }
}

/// Why a life ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Boundary,
    SelfCollision,
    Actor,
    Outscored,
}

/// Which consumable a chain head hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemHit {
    Food,
    Bonus,
}

/// Resolved move for a chain-type actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Plain move: head forward, tail retracts
    Advance,
    /// Head lands on an item
    Consume {
        item: ItemHit,
        points: u64,
        growth: usize,
    },
    /// Life ends; the chain keeps its prior state
    Crash(Cause),
}

/// Resolved move for a walking actor (maze player token)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Candidate rejected; the actor stays put
    Blocked,
    Moved {
        to: Position,
        consumed: Vec<usize>,
        points: u64,
    },
}

/// Resolved move for a ball-type actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallResolution {
    pub position: Position,
    pub heading: Heading,
    /// Indices into the obstacle slice, removed after the scan
    pub destroyed: Vec<usize>,
    pub points: u64,
    /// Set when the ball touched an open edge
    pub exit: Option<Edge>,
}

/// Resolver configured with a field and a boundary policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    pub field: Field,
    pub policy: BoundaryPolicy,
}

impl Resolver {
    pub fn new(field: Field, policy: BoundaryPolicy) -> Self {
        Self { field, policy }
    }

    /// Chain head (snake) against boundary, own body, then food and bonus
    pub fn resolve_chain(
        &self,
        snake: &Snake,
        candidate: Position,
        food: Option<Position>,
        bonus: Option<&BonusItem>,
    ) -> ChainOutcome {
        if !self.field.contains(candidate) {
            return ChainOutcome::Crash(Cause::Boundary);
        }
        if snake.body_contains(candidate) {
            return ChainOutcome::Crash(Cause::SelfCollision);
        }
        if food == Some(candidate) {
            return ChainOutcome::Consume {
                item: ItemHit::Food,
                points: ITEM_POINTS,
                growth: FOOD_GROWTH,
            };
        }
        if bonus.is_some_and(|b| b.covers(candidate)) {
            return ChainOutcome::Consume {
                item: ItemHit::Bonus,
                points: BONUS_POINTS,
                growth: BONUS_GROWTH,
            };
        }
        ChainOutcome::Advance
    }

    /// True if `pos` is outside the field or on a wall cell
    pub fn blocked(&self, pos: Position, walls: &HashSet<Position>) -> bool {
        !self.field.contains(pos) || walls.contains(&pos)
    }

    /// Walking actor: walls reject the move, pellets are eaten
    pub fn resolve_walk(
        &self,
        candidate: Position,
        walls: &HashSet<Position>,
        pellets: &[Obstacle],
    ) -> WalkOutcome {
        if self.blocked(candidate, walls) {
            return WalkOutcome::Blocked;
        }
        let consumed: Vec<usize> = pellets
            .iter()
            .enumerate()
            .filter(|(_, p)| p.pos == candidate)
            .map(|(i, _)| i)
            .collect();
        let points = consumed.len() as u64 * ITEM_POINTS;
        WalkOutcome::Moved {
            to: candidate,
            consumed,
            points,
        }
    }

    /// Pursuer: `None` when the candidate is blocked and a turn is due
    pub fn resolve_pursuer(
        &self,
        pursuer: &Pursuer,
        walls: &HashSet<Position>,
    ) -> Option<Position> {
        let candidate = pursuer.propose_motion();
        (!self.blocked(candidate, walls)).then_some(candidate)
    }

    /// Ball against edges, then obstacles, then paddles.
    ///
    /// Edges are handled per axis and before anything else, so a ball
    /// touching a wall and a paddle on the same tick bounces off the wall
    /// first. A ball reflects on the tick it reaches an edge cell.
    pub fn resolve_ball(
        &self,
        ball: &Ball,
        paddles: &[Paddle],
        obstacles: &[Obstacle],
    ) -> BallResolution {
        let exits = self.policy.exits();
        let rows = bounce_axis(
            ball.pos.row,
            ball.heading.dr,
            self.field.height - 1,
            exits.top,
            exits.bottom,
        );
        let cols = bounce_axis(
            ball.pos.col,
            ball.heading.dc,
            self.field.width - 1,
            exits.left,
            exits.right,
        );

        let mut resolved = BallResolution {
            position: Position::new(rows.pos, cols.pos),
            heading: Heading::new(rows.step, cols.step),
            destroyed: Vec::new(),
            points: 0,
            exit: None,
        };

        let exit = match (rows.exit, cols.exit) {
            (Some(AxisExit::Low), _) => Some(Edge::Top),
            (Some(AxisExit::High), _) => Some(Edge::Bottom),
            (_, Some(AxisExit::Low)) => Some(Edge::Left),
            (_, Some(AxisExit::High)) => Some(Edge::Right),
            _ => None,
        };
        if exit.is_some() {
            resolved.exit = exit;
            return resolved;
        }

        if let Some(index) = obstacles.iter().position(|o| o.pos == resolved.position) {
            resolved.heading = resolved.heading.flip_rows();
            resolved.destroyed.push(index);
            resolved.points = ITEM_POINTS;
            return resolved;
        }

        for paddle in paddles {
            if paddle.reaches(resolved.position) && paddle.approached_by(resolved.heading) {
                resolved.heading = if paddle.is_horizontal() {
                    resolved.heading.flip_rows()
                } else {
                    resolved.heading.flip_cols()
                };
                break;
            }
        }

        resolved
    }
}

/// True if `player` shares a cell with any pursuer
pub fn actors_collide(player: Position, pursuers: &[Pursuer]) -> bool {
    pursuers.iter().any(|p| p.pos == player)
}

/// Remove consumed items after a scan. Indices may be unsorted or repeated.
pub fn remove_consumed<T>(items: &mut Vec<T>, mut consumed: Vec<usize>) -> usize {
    consumed.sort_unstable_by(|a, b| b.cmp(a));
    consumed.dedup();
    let mut removed = 0;
    for index in consumed {
        if index < items.len() {
            items.remove(index);
            removed += 1;
        }
    }
    removed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisExit {
    Low,
    High,
}

#[derive(Debug, Clone, Copy)]
struct AxisMove {
    pos: i32,
    step: i32,
    exit: Option<AxisExit>,
}

/// Move one axis by `step` inside `[0, high]`, bouncing off closed ends
fn bounce_axis(from: i32, step: i32, high: i32, open_low: bool, open_high: bool) -> AxisMove {
    let mut step = step;
    let mut pos = from + step;

    // Already on the edge and still heading out
    if pos < 0 || pos > high {
        let edge = if pos < 0 { AxisExit::Low } else { AxisExit::High };
        let open = match edge {
            AxisExit::Low => open_low,
            AxisExit::High => open_high,
        };
        if open {
            return AxisMove {
                pos: pos.clamp(0, high),
                step,
                exit: Some(edge),
            };
        }
        step = -step;
        pos = from + step;
    }

    // Reaching an edge cell
    if pos == 0 && step < 0 {
        if open_low {
            return AxisMove {
                pos,
                step,
                exit: Some(AxisExit::Low),
            };
        }
        step = -step;
    } else if pos == high && step > 0 {
        if open_high {
            return AxisMove {
                pos,
                step,
                exit: Some(AxisExit::High),
            };
        }
        step = -step;
    }

    AxisMove {
        pos,
        step,
        exit: None,
    }
}
