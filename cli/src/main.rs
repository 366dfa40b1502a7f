use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweeper_core::{Difficulty, Game, GameError, MineGenerator, Minefield};
use tracing_subscriber::filter::LevelFilter;

use command::{Command, HELP};
use settings::Settings;

mod command;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Classic Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Preset (easy, intermediate, expert), `COLS,ROWS,BOMBS`, or `COLS ROWS BOMBS`
    difficulty: Vec<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with default difficulty and seed
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn resolve_difficulty(args: &[String], settings: &Settings) -> Difficulty {
    match (args, settings.difficulty.as_deref()) {
        ([], Some(from_settings)) => Difficulty::from_args_or_default(&[from_settings]),
        _ => Difficulty::from_args_or_default(args),
    }
}

/// Plays until `input` runs dry or the player quits.
fn run<G, R, W>(
    game: &mut Game<G>,
    input: R,
    mut output: W,
    mut now: impl FnMut() -> DateTime<Utc>,
) -> Result<()>
where
    G: MineGenerator,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render::render(game, now()))?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{:#}, type h for help", err)?;
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        let moved = match command {
            Command::Reveal(coords) => game.reveal(coords, now()).map(|_| ()),
            Command::Flag(coords) => game.toggle_flag(coords, now()).map(|outcome| {
                if outcome.is_rejected() {
                    log::info!("Cannot flag revealed cell at {:?}", coords);
                }
            }),
            Command::Start => {
                game.start(now());
                Ok(())
            }
            Command::GiveUp => game.give_up(now()),
            Command::NewGame => {
                game.reset();
                Ok(())
            }
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Command::Quit => break,
        };

        match moved {
            Ok(()) => {}
            Err(GameError::OutOfBounds) => writeln!(output, "That cell is not on the board")?,
            Err(err) => writeln!(output, "{}", err)?,
        }
        write!(output, "{}", render::render(game, now()))?;
    }

    output.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.tracing_level_filter());

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let difficulty = resolve_difficulty(&args.difficulty, &settings);
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    log::info!("Starting {:?} board with seed {}", difficulty, seed);

    let mut game = Game::new(Minefield::new(difficulty.config(), seed));
    run(&mut game, io::stdin().lock(), io::stdout().lock(), Utc::now)
}
