//! Maze chase: pellets, walls, two wandering pursuers

use std::collections::HashSet;

use super::GameEvent;
use crate::input::Intent;
use crate::sim::collision::{
    BoundaryPolicy, Cause, Resolver, WalkOutcome, actors_collide, remove_consumed,
};
use crate::sim::entity::{Entity, Obstacle, ObstacleKind, PlayerToken, Pursuer};
use crate::sim::grid::{Direction, Field, Position};
use crate::sim::lifecycle::Lifecycle;
use crate::sim::rng::RandomSource;

/// '#' wall, '.' pellet, ' ' open floor
pub const LAYOUT: [&str; 21] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#.####.##..........##.####.#",
    "#.####.##.########.##.####.#",
    "#...........##.............#",
    "############################",
];

pub const PLAYER_START: Position = Position::new(1, 1);

pub const PURSUER_STARTS: [(Position, Direction); 2] = [
    (Position::new(11, 11), Direction::Down),
    (Position::new(11, 12), Direction::Up),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeArena {
    pub resolver: Resolver,
    pub walls: Vec<Obstacle>,
    pub wall_cells: HashSet<Position>,
    pub pellets: Vec<Obstacle>,
    pub player: PlayerToken,
    pub pursuers: Vec<Pursuer>,
    /// Direction requested since the last motion tick
    pub pending: Option<Direction>,
}

impl MazeArena {
    pub fn new() -> Self {
        Self::from_layout(&LAYOUT, PLAYER_START, &PURSUER_STARTS)
    }

    /// Build from text rows. Rows shorter than the widest are padded with
    /// open floor.
    pub fn from_layout(
        rows: &[&str],
        player: Position,
        pursuers: &[(Position, Direction)],
    ) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let field = Field::new(rows.len() as i32, width);

        let mut walls = Vec::new();
        let mut pellets = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row as i32, col as i32);
                match ch {
                    '#' => walls.push(Obstacle::new(pos, ObstacleKind::Wall)),
                    '.' => pellets.push(Obstacle::new(pos, ObstacleKind::Pellet)),
                    _ => {}
                }
            }
        }
        let wall_cells = walls.iter().map(|w| w.pos).collect();

        Self {
            resolver: Resolver::new(field, BoundaryPolicy::Terminate),
            walls,
            wall_cells,
            pellets,
            player: PlayerToken::new(player),
            pursuers: pursuers
                .iter()
                .map(|&(pos, dir)| Pursuer::new(pos, dir))
                .collect(),
            pending: None,
        }
    }

    pub fn field(&self) -> Field {
        self.resolver.field
    }

    pub fn apply_intent(&mut self, intent: Intent) {
        if let Some(dir) = intent.direction() {
            self.pending = Some(dir);
        }
    }

    /// Player, then pursuers, then the clear check ahead of the catch check.
    ///
    /// Contact is checked twice: once after the player moves and once after
    /// the pursuers move, so neither stepping onto a pursuer nor swapping
    /// cells with one gets past it.
    pub fn step(
        &mut self,
        rng: &mut dyn RandomSource,
        lifecycle: &mut Lifecycle,
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(dir) = self.pending.take() {
            let candidate = self.player.propose_motion(dir);
            match self
                .resolver
                .resolve_walk(candidate, &self.wall_cells, &self.pellets)
            {
                WalkOutcome::Blocked => {}
                WalkOutcome::Moved {
                    to,
                    consumed,
                    points,
                } => {
                    self.player.pos = to;
                    let eaten = remove_consumed(&mut self.pellets, consumed);
                    if eaten > 0 {
                        lifecycle.award(points);
                        events.push(GameEvent::PelletEaten(to));
                    }
                }
            }
        }

        let walked_into = actors_collide(self.player.pos, &self.pursuers);

        for pursuer in &mut self.pursuers {
            match self.resolver.resolve_pursuer(pursuer, &self.wall_cells) {
                Some(to) => pursuer.pos = to,
                None => pursuer.turn(rng),
            }
        }

        if self.pellets.is_empty() {
            if lifecycle.win() {
                events.push(GameEvent::Cleared);
            }
        } else if (walked_into || actors_collide(self.player.pos, &self.pursuers))
            && lifecycle.lose(Cause::Actor)
        {
            events.push(GameEvent::LifeLost(Cause::Actor));
        }
    }

    pub fn entities(&self) -> Vec<Entity<'_>> {
        let mut out: Vec<Entity<'_>> = Vec::with_capacity(
            self.walls.len() + self.pellets.len() + self.pursuers.len() + 1,
        );
        out.extend(self.walls.iter().map(Entity::Obstacle));
        out.extend(self.pellets.iter().map(Entity::Obstacle));
        out.push(Entity::Player(&self.player));
        out.extend(self.pursuers.iter().map(Entity::Pursuer));
        out
    }

    pub fn status(&self, lifecycle: &Lifecycle) -> String {
        format!(
            "Score: {}   High Score: {}   Pellets left: {}",
            lifecycle.score(),
            lifecycle.high_score(),
            self.pellets.len()
        )
    }
}

impl Default for MazeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lifecycle::GamePhase;
    use crate::sim::rng::ScriptedRng;

    const CORRIDOR: [&str; 3] = ["#######", "#.. . #", "#######"];

    #[test]
    fn test_layout_parse() {
        let arena = MazeArena::new();
        assert_eq!(arena.field(), Field::new(21, 28));
        assert!(arena.wall_cells.contains(&Position::new(0, 0)));
        assert!(!arena.pellets.is_empty());
        assert_eq!(arena.pursuers.len(), 2);
    }

    #[test]
    fn test_wall_rejects_player() {
        let mut arena = MazeArena::new();
        arena.apply_intent(Intent::MoveUp);
        arena.step(&mut ScriptedRng::zeros(), &mut Lifecycle::new(), &mut Vec::new());
        assert_eq!(arena.player.pos, PLAYER_START);
    }

    #[test]
    fn test_pellet_scores_ten() {
        let mut arena = MazeArena::new();
        let before = arena.pellets.len();
        let mut lifecycle = Lifecycle::new();
        arena.apply_intent(Intent::MoveRight);
        arena.step(&mut ScriptedRng::zeros(), &mut lifecycle, &mut Vec::new());
        assert_eq!(arena.player.pos, Position::new(1, 2));
        assert_eq!(arena.pellets.len(), before - 1);
        assert_eq!(lifecycle.score(), 10);
    }

    #[test]
    fn test_blocked_pursuer_turns_without_reverse() {
        // Pursuer facing a wall: stays put and picks from the non-reverse set
        for roll in 0..3 {
            let mut arena = MazeArena::from_layout(
                &CORRIDOR,
                Position::new(1, 1),
                &[(Position::new(1, 5), Direction::Right)],
            );
            let mut rng = ScriptedRng::new(vec![roll]);
            arena.step(&mut rng, &mut Lifecycle::new(), &mut Vec::new());
            let pursuer = arena.pursuers[0];
            assert_eq!(pursuer.pos, Position::new(1, 5));
            assert_ne!(pursuer.dir, Direction::Left);
            assert_eq!(rng.consumed(), 1);
        }
    }

    #[test]
    fn test_caught_by_pursuer() {
        let mut arena = MazeArena::from_layout(
            &CORRIDOR,
            Position::new(1, 1),
            &[(Position::new(1, 3), Direction::Left)],
        );
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.apply_intent(Intent::MoveRight);
        arena.step(&mut ScriptedRng::zeros(), &mut lifecycle, &mut events);
        assert_eq!(arena.player.pos, Position::new(1, 2));
        assert_eq!(lifecycle.phase(), GamePhase::GameOver);
        assert!(events.contains(&GameEvent::LifeLost(Cause::Actor)));
    }

    fn step_right_into(pursuer_dir: Direction) -> (MazeArena, Lifecycle, Vec<GameEvent>) {
        let mut arena = MazeArena::from_layout(
            &CORRIDOR,
            Position::new(1, 1),
            &[(Position::new(1, 2), pursuer_dir)],
        );
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.apply_intent(Intent::MoveRight);
        arena.step(&mut ScriptedRng::zeros(), &mut lifecycle, &mut events);
        (arena, lifecycle, events)
    }

    #[test]
    fn test_stepping_onto_pursuer_that_moves_away() {
        let (arena, lifecycle, events) = step_right_into(Direction::Right);
        assert_eq!(arena.player.pos, Position::new(1, 2));
        assert_eq!(arena.pursuers[0].pos, Position::new(1, 3));
        assert_eq!(lifecycle.phase(), GamePhase::GameOver);
        assert!(events.contains(&GameEvent::LifeLost(Cause::Actor)));
    }

    #[test]
    fn test_swapping_cells_with_pursuer() {
        let (arena, lifecycle, _) = step_right_into(Direction::Left);
        assert_eq!(arena.player.pos, Position::new(1, 2));
        assert_eq!(arena.pursuers[0].pos, Position::new(1, 1));
        assert_eq!(lifecycle.phase(), GamePhase::GameOver);
        assert_eq!(lifecycle.last_cause(), Some(Cause::Actor));
    }

    #[test]
    fn test_last_pellet_under_pursuer_wins() {
        // Pursuer sits on the last pellet and the player walks onto it
        let mut arena = MazeArena::from_layout(
            &["#####", "#.  #", "#####"],
            Position::new(1, 2),
            &[(Position::new(1, 1), Direction::Up)],
        );
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.apply_intent(Intent::MoveLeft);
        arena.step(&mut ScriptedRng::zeros(), &mut lifecycle, &mut events);
        assert_eq!(arena.player.pos, Position::new(1, 1));
        assert_eq!(arena.pursuers[0].pos, Position::new(1, 1));
        assert_eq!(lifecycle.phase(), GamePhase::Won);
        assert_eq!(
            events,
            vec![GameEvent::PelletEaten(Position::new(1, 1)), GameEvent::Cleared]
        );
    }

    #[test]
    fn test_last_pellet_wins_even_when_caught() {
        let mut arena = MazeArena::from_layout(
            &["#####", "#.  #", "#####"],
            Position::new(1, 2),
            &[(Position::new(1, 2), Direction::Left)],
        );
        // Player takes the last pellet and the pursuer follows onto the same cell
        let mut lifecycle = Lifecycle::new();
        let mut events = Vec::new();
        arena.apply_intent(Intent::MoveLeft);
        arena.step(&mut ScriptedRng::zeros(), &mut lifecycle, &mut events);
        assert_eq!(arena.player.pos, Position::new(1, 1));
        assert_eq!(arena.pursuers[0].pos, Position::new(1, 1));
        assert_eq!(lifecycle.phase(), GamePhase::Won);
        assert_eq!(
            events,
            vec![GameEvent::PelletEaten(Position::new(1, 1)), GameEvent::Cleared]
        );
    }
}
