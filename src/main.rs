//! Term Arcade entry point
//!
//! Parses the command line, loads settings, sets up the terminal and runs
//! the chosen game until the player quits.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use term_arcade::driver;
use term_arcade::settings::Settings;
use term_arcade::sim::{GameContext, Variant};
use term_arcade::term::{KeyboardInput, TerminalDisplay};

/// Grid arcade games in the terminal
#[derive(Parser, Debug)]
#[command(name = "term-arcade", version, about)]
struct Cli {
    /// Game to play
    #[arg(value_enum)]
    variant: Variant,

    /// RNG seed; overrides the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match play(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("term-arcade: {e}");
            ExitCode::FAILURE
        }
    }
}

fn play(cli: &Cli) -> io::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let seed = cli
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("{} with seed {}", cli.variant, seed);

    let mut ctx = GameContext::new(cli.variant, settings, seed);
    let summary = {
        let mut display = TerminalDisplay::new()?;
        display.check_size(&term_arcade::frame::build_frame(&ctx));
        let mut input = KeyboardInput::new();
        driver::run(&mut ctx, &mut input, &mut display)?
    };

    println!("{}: final score {}", cli.variant, summary.score);
    println!("High score: {}", summary.high_score);
    for line in ctx.lifecycle.leaderboard().lines(3) {
        println!("  {line}");
    }
    println!("Seed: {seed}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_shape() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_variant_and_seed() {
        let cli = Cli::try_parse_from(["term-arcade", "breakout", "--seed", "7"]).unwrap();
        assert_eq!(cli.variant, Variant::Breakout);
        assert_eq!(cli.seed, Some(7));
        assert!(cli.config.is_none());
        assert!(Cli::try_parse_from(["term-arcade", "tetris"]).is_err());
    }
}
