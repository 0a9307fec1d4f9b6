mod config;
mod food;
mod game;
mod input;
mod render;
mod snake;
mod term;
mod timer;

use std::fs::File;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use config::{Args, GameConfig};
use game::{Game, Speed, Status};
use input::Command;
use term::TermManager;
use timer::{PeriodicTimer, Scheduler, SystemClock};

pub type TermInt = u16;
pub type Coords = (u16, u16);

// How long to wait for input while no tick is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

const INTRO: &[&str] = &[
    "Arrow keys or WASD to move",
    "Enter to start, P to pause, R to resume",
    "1 / 2 / 3 for slow / medium / fast",
    "Q or Esc to quit",
];

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = File::create(args.log_file())
        .with_context(|| format!("could not create log file {}", args.log_file().display()))?;
    WriteLogger::init(args.log_level(), Config::default(), log_file)
        .context("could not set up logging")?;

    let config = args.game_config()?;
    info!("Starting with {:?}", config);

    let mut term = TermManager::new(&config)?;
    run_restoring(
        &mut term,
        TermManager::setup,
        |term| play(term, config, args.speed(), args.seed()),
        TermManager::restore,
    )
}

/// Runs `body` between `setup` and `restore`. `restore` runs even if `setup` or `body`
/// fails, and the first error wins.
fn run_restoring<T>(
    term: &mut T,
    setup: impl FnOnce(&mut T) -> Result<()>,
    body: impl FnOnce(&mut T) -> Result<()>,
    restore: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let res = setup(&mut *term).and_then(|_| body(&mut *term));
    let restored = restore(&mut *term);
    res.and(restored)
}

fn play(term: &mut TermManager, config: GameConfig, speed: Speed, seed: Option<u64>) -> Result<()> {
    term.draw_borders()?;
    term.show_message(INTRO)?;

    let mut game = Game::new(config, speed, PeriodicTimer::new(SystemClock::new()), seed);
    show_status(term, &game)?;

    loop {
        let timeout = game.until_next_tick().unwrap_or(IDLE_POLL);

        for key_ev in term.read_key_events(timeout)? {
            let command = match input::command_for(&key_ev) {
                Some(command) => command,
                None => continue,
            };

            match command {
                Command::Quit => {
                    info!("Quitting");
                    return Ok(());
                },
                Command::Steer(heading) => game.steer(heading),
                Command::Start => game.start(),
                Command::Pause => game.pause(),
                Command::Resume => game.resume(),
                Command::SetSpeed(speed) => game.set_speed(speed),
            }

            if !matches!(command, Command::Steer(_)) {
                show_status(term, &game)?;
            }
        }

        // Refresh the status line while the snake moves, and once more when it stops
        let was_running = game.status() == Status::Running;
        game.run_due_ticks(term)?;
        if was_running {
            show_status(term, &game)?;
        }
    }
}

fn show_status<S: Scheduler>(term: &mut TermManager, game: &Game<S>) -> Result<()> {
    let status = match game.status() {
        Status::Running => "Running",
        Status::Paused => "Paused (R to resume)",
        Status::Stopped if game.snake().is_some() => "Game over (Enter for a new game)",
        Status::Stopped => "Press Enter to start",
    };

    let mut line = format!("{} | speed: {:?}", status, game.speed());
    if let Some(snake) = game.snake() {
        line.push_str(&format!(" | heading: {:?} | length: {}", snake.heading(), snake.len()));
    }
    term.show_status(&line)
}
