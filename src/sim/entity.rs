//! Entity model
//!
//! Movable actors expose `propose_motion()`, which computes a candidate next
//! state without touching committed state. The collision resolver decides
//! what happens to the candidate; the arena commits the result.

use std::collections::VecDeque;

use super::grid::{Direction, Field, Heading, Position};
use super::rng::{RandomSource, pick};

/// Growth-snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Position>,
    /// Direction of the last committed move
    heading: Direction,
    /// Direction the next move will take
    pending: Direction,
}

impl Snake {
    /// Straight snake of `len` segments with the body trailing behind `head`
    pub fn new(head: Position, heading: Direction, len: usize) -> Self {
        let mut segments = VecDeque::with_capacity(len.max(1));
        let mut cell = head;
        for _ in 0..len.max(1) {
            segments.push_back(cell);
            cell = cell.step(heading.reverse());
        }
        Self {
            segments,
            heading,
            pending: heading,
        }
    }

    /// Build from explicit segments (head first)
    pub fn from_segments(segments: impl IntoIterator<Item = Position>, heading: Direction) -> Self {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "snake needs at least a head");
        Self {
            segments,
            heading,
            pending: heading,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Queue a turn. A turn back onto the body is ignored.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir.is_reverse_of(self.heading) {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Candidate head cell for the next move
    pub fn propose_motion(&self) -> Position {
        self.head().step(self.pending)
    }

    /// Commit a resolved head cell. The tail is left in place; callers
    /// retract it with [`Snake::retract_tail`].
    pub fn advance(&mut self, head: Position) {
        self.heading = self.pending;
        self.segments.push_front(head);
    }

    pub fn retract_tail(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop_back();
        }
    }

    /// Append `n` copies of the tail cell. They unfurl one per move.
    pub fn grow(&mut self, n: usize) {
        let tail = self.tail();
        self.segments.extend(std::iter::repeat_n(tail, n));
    }

    /// True if `pos` is any segment other than the head
    pub fn body_contains(&self, pos: Position) -> bool {
        self.segments.iter().skip(1).any(|&s| s == pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// True if two distinct segments overlap. Stacked copies of the tail
    /// cell left by [`Snake::grow`] are not an overlap.
    pub fn has_overlap(&self) -> bool {
        let tail = self.tail();
        let stacked = self
            .segments
            .iter()
            .rev()
            .take_while(|&&s| s == tail)
            .count();
        let distinct = self.segments.len() - stacked + 1;
        let cells: Vec<Position> = self.segments.iter().take(distinct).copied().collect();
        (0..cells.len()).any(|i| cells[i + 1..].contains(&cells[i]))
    }
}

/// Ball-type actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub pos: Position,
    pub heading: Heading,
}

impl Ball {
    pub fn new(pos: Position, heading: Heading) -> Self {
        Self { pos, heading }
    }

    pub fn propose_motion(&self) -> Position {
        self.pos.offset(self.heading.dr, self.heading.dc)
    }
}

/// Straight paddle. `face` points from the paddle into the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    /// Top (vertical) or leftmost (horizontal) cell
    pub anchor: Position,
    pub len: i32,
    pub face: Direction,
}

impl Paddle {
    pub fn new(anchor: Position, len: i32, face: Direction) -> Self {
        Self { anchor, len, face }
    }

    /// Paddles facing up/down lie along a row
    pub fn is_horizontal(&self) -> bool {
        matches!(self.face, Direction::Up | Direction::Down)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (anchor, horizontal) = (self.anchor, self.is_horizontal());
        (0..self.len).map(move |i| {
            if horizontal {
                anchor.offset(0, i)
            } else {
                anchor.offset(i, 0)
            }
        })
    }

    /// Candidate paddle shifted along its axis, or `None` if it would leave
    /// the field.
    pub fn propose_motion(&self, shift: i32, field: &Field) -> Option<Paddle> {
        let moved = if self.is_horizontal() {
            Paddle {
                anchor: self.anchor.offset(0, shift),
                ..*self
            }
        } else {
            Paddle {
                anchor: self.anchor.offset(shift, 0),
                ..*self
            }
        };
        let (start, limit) = if moved.is_horizontal() {
            (moved.anchor.col, field.width)
        } else {
            (moved.anchor.row, field.height)
        };
        (start >= 0 && start + moved.len <= limit).then_some(moved)
    }

    /// True if a ball at `pos` sits on the cell line just in front of the
    /// paddle. The span reaches one cell past the far end.
    pub fn reaches(&self, pos: Position) -> bool {
        let front = self.anchor.step(self.face);
        if self.is_horizontal() {
            pos.row == front.row && pos.col >= front.col && pos.col <= front.col + self.len
        } else {
            pos.col == front.col && pos.row >= front.row && pos.row <= front.row + self.len
        }
    }

    /// True if `heading` carries the ball toward the paddle
    pub fn approached_by(&self, heading: Heading) -> bool {
        match self.face {
            Direction::Up => heading.dr > 0,
            Direction::Down => heading.dr < 0,
            Direction::Left => heading.dc > 0,
            Direction::Right => heading.dc < 0,
        }
    }
}

/// Maze chaser that bounces off walls at random
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pursuer {
    pub pos: Position,
    pub dir: Direction,
}

impl Pursuer {
    pub fn new(pos: Position, dir: Direction) -> Self {
        Self { pos, dir }
    }

    pub fn propose_motion(&self) -> Position {
        self.pos.step(self.dir)
    }

    /// Pick a new direction uniformly among the three that are not the
    /// reverse of the current one. The blocked direction stays eligible.
    pub fn turn(&mut self, rng: &mut dyn RandomSource) {
        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| !d.is_reverse_of(self.dir))
            .collect();
        if let Some(dir) = pick(rng, &options) {
            self.dir = dir;
        }
    }
}

/// Player token moved one cell per directional intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerToken {
    pub pos: Position,
}

impl PlayerToken {
    pub fn new(pos: Position) -> Self {
        Self { pos }
    }

    pub fn propose_motion(&self, dir: Direction) -> Position {
        self.pos.step(dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Brick,
    Wall,
    Pellet,
    Food,
}

/// Single-cell static entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub pos: Position,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(pos: Position, kind: ObstacleKind) -> Self {
        Self { pos, kind }
    }
}

/// Timed square consumable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusItem {
    /// Top-left cell
    pub origin: Position,
    pub size: i32,
    /// Ticks left; always > 0 while the item exists
    pub timer: u32,
}

impl BonusItem {
    pub fn new(origin: Position, size: i32, timer: u32) -> Self {
        Self {
            origin,
            size,
            timer,
        }
    }

    /// Inclusive box test
    pub fn covers(&self, pos: Position) -> bool {
        let last = self.size - 1;
        (self.origin.row..=self.origin.row + last).contains(&pos.row)
            && (self.origin.col..=self.origin.col + last).contains(&pos.col)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (origin, size) = (self.origin, self.size);
        (0..size).flat_map(move |r| (0..size).map(move |c| origin.offset(r, c)))
    }
}

/// Borrowed view over every kind of entity, for frame building
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Paddle(&'a Paddle),
    Ball(&'a Ball),
    Snake(&'a Snake),
    Pursuer(&'a Pursuer),
    Player(&'a PlayerToken),
    Obstacle(&'a Obstacle),
    Bonus(&'a BonusItem),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    fn scenario_snake() -> Snake {
        Snake::from_segments(
            [Position::new(5, 5), Position::new(5, 4), Position::new(5, 3)],
            Direction::Right,
        )
    }

    #[test]
    fn test_new_snake_trails_behind_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake, scenario_snake());
    }

    #[test]
    fn test_steer_rejects_reverse() {
        let mut snake = scenario_snake();
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.pending(), Direction::Right);
        assert!(snake.steer(Direction::Up));
        // Still compared against the committed heading, not the queued one
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.propose_motion(), Position::new(4, 5));
    }

    #[test]
    fn test_propose_does_not_mutate() {
        let snake = scenario_snake();
        let before = snake.clone();
        let _ = snake.propose_motion();
        assert_eq!(snake, before);
    }

    #[test]
    fn test_grow_appends_tail_copies() {
        let mut snake = scenario_snake();
        snake.grow(2);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.segments()[3], Position::new(5, 3));
        assert_eq!(snake.segments()[4], Position::new(5, 3));
        assert!(!snake.has_overlap());
    }

    #[test]
    fn test_has_overlap_detects_crossing() {
        let snake = Snake::from_segments(
            [
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(1, 0),
            ],
            Direction::Up,
        );
        assert!(snake.has_overlap());
    }

    #[test]
    fn test_paddle_shift_bounds() {
        let field = Field::new(24, 80);
        let paddle = Paddle::new(Position::new(22, 0), 20, Direction::Up);
        assert!(paddle.propose_motion(-2, &field).is_none());
        let moved = paddle.propose_motion(2, &field).unwrap();
        assert_eq!(moved.anchor, Position::new(22, 2));
        let edge = Paddle::new(Position::new(22, 60), 20, Direction::Up);
        assert!(edge.propose_motion(2, &field).is_none());
    }

    #[test]
    fn test_paddle_reach() {
        let paddle = Paddle::new(Position::new(22, 10), 5, Direction::Up);
        assert!(paddle.reaches(Position::new(21, 10)));
        assert!(paddle.reaches(Position::new(21, 15)));
        assert!(!paddle.reaches(Position::new(21, 16)));
        assert!(!paddle.reaches(Position::new(22, 12)));
        assert!(paddle.approached_by(Heading::new(1, -1)));
        assert!(!paddle.approached_by(Heading::new(-1, -1)));

        let left = Paddle::new(Position::new(10, 1), 5, Direction::Right);
        assert!(left.reaches(Position::new(12, 2)));
        assert!(left.approached_by(Heading::new(1, -1)));
    }

    #[test]
    fn test_pursuer_never_turns_back() {
        for roll in 0..3 {
            let mut pursuer = Pursuer::new(Position::new(1, 1), Direction::Down);
            pursuer.turn(&mut ScriptedRng::new(vec![roll]));
            assert_ne!(pursuer.dir, Direction::Up);
        }
    }

    #[test]
    fn test_bonus_box_inclusive() {
        let bonus = BonusItem::new(Position::new(4, 4), 3, 200);
        assert!(bonus.covers(Position::new(4, 4)));
        assert!(bonus.covers(Position::new(6, 6)));
        assert!(!bonus.covers(Position::new(7, 6)));
        assert_eq!(bonus.cells().count(), 9);
    }
}
