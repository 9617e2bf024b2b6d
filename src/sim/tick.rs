//! Fixed-cadence simulation tick
//!
//! One call per input poll. Actors only move on motion ticks (every Nth tick
//! for the variant); paddles respond to input on every tick.

use super::arena::GameEvent;
use super::rng::RandomSource;
use super::state::GameContext;
use crate::input::Intent;

/// Advance the game by one tick. Returns the events it produced.
///
/// In a terminal phase only `Restart` does anything.
pub fn tick<R: RandomSource>(ctx: &mut GameContext<R>, intent: Option<Intent>) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if ctx.lifecycle.phase().is_terminal() {
        if intent == Some(Intent::Restart) {
            ctx.restart();
        }
        return events;
    }

    if let Some(intent) = intent {
        ctx.arena.apply_intent(intent);
    }

    if ctx.cadence().is_motion_tick(ctx.time_ticks) {
        ctx.arena.step(&mut ctx.rng, &mut ctx.lifecycle, &mut events);
    }
    ctx.time_ticks += 1;

    if !ctx.lifecycle.phase().is_terminal() {
        ctx.arena.tick_timers(&mut events);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::arena::Arena;
    use crate::sim::collision::Cause;
    use crate::sim::entity::Ball;
    use crate::sim::grid::{Heading, Position};
    use crate::sim::lifecycle::GamePhase;
    use crate::sim::state::Variant;

    fn ball_pos<R: RandomSource>(ctx: &GameContext<R>) -> Position {
        match &ctx.arena {
            Arena::Breakout(a) => a.ball.pos,
            Arena::Pong(a) => a.ball.pos,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_breakout_ball_moves_every_third_tick() {
        let mut ctx = GameContext::new(Variant::Breakout, Settings::default(), 7);
        let start = ball_pos(&ctx);
        let mut moves = 0;
        let mut last = start;
        for _ in 0..9 {
            tick(&mut ctx, None);
            let now = ball_pos(&ctx);
            if now != last {
                moves += 1;
            }
            last = now;
        }
        assert_eq!(moves, 3);
        assert_eq!(ctx.time_ticks, 9);
    }

    #[test]
    fn test_paddle_moves_off_motion_tick() {
        let mut ctx = GameContext::new(Variant::Breakout, Settings::default(), 7);
        tick(&mut ctx, None);
        let Arena::Breakout(before) = ctx.arena.clone() else {
            unreachable!()
        };
        tick(&mut ctx, Some(Intent::MoveRight));
        let Arena::Breakout(after) = &ctx.arena else {
            unreachable!()
        };
        assert_eq!(after.paddle.anchor.col, before.paddle.anchor.col + 2);
        assert_eq!(after.ball, before.ball);
    }

    #[test]
    fn test_terminal_phase_freezes_until_restart() {
        let mut ctx = GameContext::new(Variant::Breakout, Settings::default(), 7);
        if let Arena::Breakout(a) = &mut ctx.arena {
            a.ball = Ball::new(Position::new(22, 5), Heading::new(1, 1));
        }
        let events = tick(&mut ctx, None);
        assert_eq!(events, vec![GameEvent::LifeLost(Cause::Boundary)]);
        assert_eq!(ctx.lifecycle.phase(), GamePhase::GameOver);

        let frozen = ctx.arena.clone();
        assert!(tick(&mut ctx, Some(Intent::MoveLeft)).is_empty());
        assert_eq!(ctx.arena, frozen);

        tick(&mut ctx, Some(Intent::Restart));
        assert_eq!(ctx.lifecycle.phase(), GamePhase::Playing);
        assert_eq!(ctx.lifecycle.life(), 2);
        assert_eq!(ctx.time_ticks, 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut ctx = GameContext::new(Variant::Snake, Settings::default(), 3);
        tick(&mut ctx, Some(Intent::Restart));
        assert_eq!(ctx.lifecycle.life(), 1);
        assert_eq!(ctx.time_ticks, 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = [
            Some(Intent::MoveUp),
            None,
            Some(Intent::MoveRight),
            None,
            Some(Intent::MoveDown),
            Some(Intent::MoveLeft),
        ];
        for variant in Variant::ALL {
            let mut a = GameContext::new(variant, Settings::default(), 2024);
            let mut b = GameContext::new(variant, Settings::default(), 2024);
            for _ in 0..40 {
                for &intent in &script {
                    assert_eq!(tick(&mut a, intent), tick(&mut b, intent));
                }
            }
            assert_eq!(a.arena, b.arena);
            assert_eq!(a.lifecycle, b.lifecycle);
        }
    }
}
