//! Frame snapshots
//!
//! A [`Frame`] is everything a display needs for one redraw: the field size,
//! the glyph cells in draw order, the status line, and an optional banner.
//! Building one never touches a terminal, so frames are easy to assert on.

use std::io;

use crate::highscores::MAX_HIGH_SCORES;
use crate::sim::entity::{Entity, ObstacleKind};
use crate::sim::grid::{Field, Position};
use crate::sim::lifecycle::GamePhase;
use crate::sim::rng::RandomSource;
use crate::sim::state::GameContext;

/// Colour role of a cell; the display maps it to real colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    SnakeHead,
    SnakeBody,
    Food,
    Bonus,
    Wall,
    Pellet,
    Player,
    Pursuer,
    Paddle,
    Ball,
    Brick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub pos: Position,
    pub glyph: char,
    pub style: StyleTag,
}

impl Cell {
    fn new(pos: Position, glyph: char, style: StyleTag) -> Self {
        Self { pos, glyph, style }
    }
}

/// Centred message shown over the field at the end of a life
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub field: Field,
    /// Draw order; later cells overwrite earlier ones
    pub cells: Vec<Cell>,
    pub status: String,
    pub banner: Option<Banner>,
}

impl Frame {
    /// Topmost cell at `pos`, if any
    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cells.iter().rev().find(|c| c.pos == pos)
    }
}

/// Sink for rendered frames
pub trait Display {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;
}

pub fn build_frame<R: RandomSource>(ctx: &GameContext<R>) -> Frame {
    let mut cells = Vec::new();
    for entity in ctx.arena.entities() {
        push_entity(&mut cells, entity);
    }

    Frame {
        field: ctx.arena.field(),
        cells,
        status: ctx.arena.status(&ctx.lifecycle),
        banner: banner(ctx),
    }
}

fn push_entity(cells: &mut Vec<Cell>, entity: Entity<'_>) {
    match entity {
        Entity::Snake(snake) => {
            // Tail first so the head is drawn last
            let mut segments = snake.segments().iter().rev().peekable();
            while let Some(&pos) = segments.next() {
                if segments.peek().is_some() {
                    cells.push(Cell::new(pos, '#', StyleTag::SnakeBody));
                } else {
                    cells.push(Cell::new(pos, '@', StyleTag::SnakeHead));
                }
            }
        }
        Entity::Obstacle(obstacle) => {
            let (glyph, style) = match obstacle.kind {
                ObstacleKind::Food => ('*', StyleTag::Food),
                ObstacleKind::Wall => ('#', StyleTag::Wall),
                ObstacleKind::Pellet => ('.', StyleTag::Pellet),
                ObstacleKind::Brick => ('#', StyleTag::Brick),
            };
            cells.push(Cell::new(obstacle.pos, glyph, style));
        }
        Entity::Bonus(bonus) => {
            cells.extend(bonus.cells().map(|pos| Cell::new(pos, 'X', StyleTag::Bonus)));
        }
        Entity::Player(player) => cells.push(Cell::new(player.pos, 'C', StyleTag::Player)),
        Entity::Pursuer(pursuer) => cells.push(Cell::new(pursuer.pos, 'G', StyleTag::Pursuer)),
        Entity::Paddle(paddle) => {
            let glyph = if paddle.is_horizontal() { '=' } else { '|' };
            cells.extend(paddle.cells().map(|pos| Cell::new(pos, glyph, StyleTag::Paddle)));
        }
        Entity::Ball(ball) => cells.push(Cell::new(ball.pos, 'O', StyleTag::Ball)),
    }
}

fn banner<R: RandomSource>(ctx: &GameContext<R>) -> Option<Banner> {
    let title = match ctx.lifecycle.phase() {
        GamePhase::Playing => return None,
        GamePhase::GameOver => "Game Over",
        GamePhase::Won => "You Won!",
    };

    let mut lines = vec![
        format!("Your score: {}", ctx.lifecycle.score()),
        format!("High score: {}", ctx.lifecycle.high_score()),
        "Press R to play again or Q to quit".to_string(),
    ];
    let board = ctx.lifecycle.leaderboard();
    if !board.is_empty() {
        lines.push(String::new());
        lines.push(match board.wins() {
            0 => "Best lives this session".to_string(),
            wins => format!("Best lives this session ({wins} won)"),
        });
        lines.extend(board.lines(MAX_HIGH_SCORES));
    }

    Some(Banner {
        title: title.to_string(),
        lines,
    })
}
