//! Poll / tick / render loop
//!
//! Each iteration waits up to the variant's poll timeout for one intent,
//! advances the simulation by one tick and redraws. Quit ends the loop.

use std::io;

use crate::frame::{Display, build_frame};
use crate::input::{InputSource, Intent};
use crate::sim::arena::GameEvent;
use crate::sim::rng::RandomSource;
use crate::sim::state::GameContext;
use crate::sim::tick::tick;

/// What a run ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub ticks: u64,
}

pub fn run<R: RandomSource>(
    ctx: &mut GameContext<R>,
    input: &mut dyn InputSource,
    display: &mut dyn Display,
) -> io::Result<RunSummary> {
    let timeout = ctx.cadence().poll_timeout();
    let mut ticks = 0u64;

    log::info!("{} started", ctx.variant);
    display.render(&build_frame(ctx))?;

    loop {
        let intent = input.poll(timeout)?;
        if intent == Some(Intent::Quit) {
            break;
        }

        for event in tick(ctx, intent) {
            log_event(&event);
        }
        ticks += 1;

        display.render(&build_frame(ctx))?;
    }

    let summary = RunSummary {
        score: ctx.lifecycle.score(),
        high_score: ctx.lifecycle.high_score(),
        lives: ctx.lifecycle.life(),
        ticks,
    };
    log::info!(
        "{} quit after {} ticks: score {}, high score {}",
        ctx.variant,
        summary.ticks,
        summary.score,
        summary.high_score
    );
    Ok(summary)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LifeLost(cause) => log::debug!("life lost: {:?}", cause),
        GameEvent::Cleared => log::debug!("cleared"),
        other => log::debug!("{:?}", other),
    }
}
