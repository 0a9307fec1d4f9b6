use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use simplelog::LevelFilter;

use crate::game::Speed;
use crate::render::SEGMENT_GAP;

const DEFAULT_WIDTH: u32 = 1200;
const DEFAULT_HEIGHT: u32 = 650;
const DEFAULT_CELL_SIZE: u32 = 67;
const DEFAULT_LENGTH: usize = 5;
// Smallest cell that still leaves a visible snake square after the segment gap
const MIN_CELL_SIZE: u32 = SEGMENT_GAP + 1;

/// Board geometry, in pixels, and the length new snakes start with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub initial_length: usize,
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.cell_size >= MIN_CELL_SIZE,
            "cell size must be at least {} pixels, got {}",
            MIN_CELL_SIZE, self.cell_size
        );
        ensure!(self.initial_length >= 1, "the snake needs at least one cell");
        let min_side = 2 * u64::from(self.cell_size);
        ensure!(
            u64::from(self.width) >= min_side && u64::from(self.height) >= min_side,
            "a {}x{} board is too small for {} pixel cells, it needs at least two cells per side",
            self.width, self.height, self.cell_size
        );
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_length: DEFAULT_LENGTH,
        }
    }
}

/// Snake in the terminal. Arrow keys or WASD to steer.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Board width in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_WIDTH)]
    width: u32,
    /// Board height in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    /// Side of one grid cell in pixels.
    #[arg(
        long = "cell-size",
        value_name = "PIXELS",
        default_value_t = DEFAULT_CELL_SIZE,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_CELL_SIZE)..)
    )]
    cell_size: u32,
    /// Number of cells the snake starts with.
    #[arg(long = "length", value_name = "CELLS", default_value_t = DEFAULT_LENGTH)]
    initial_length: usize,
    /// Speed preset: slow, medium or fast. Anything else means medium.
    #[arg(long, value_name = "PRESET", default_value = "medium")]
    speed: String,
    /// Seed for food placement, for reproducible games.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// File the log is written to.
    #[arg(long = "log-file", value_name = "PATH", default_value = "snake.log")]
    log_file: PathBuf,
    /// Log debug messages too.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig> {
        let config = GameConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            initial_length: self.initial_length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn speed(&self) -> Speed {
        Speed::from_name(&self.speed)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn log_file(&self) -> &PathBuf {
        &self.log_file
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {LevelFilter::Debug} else {LevelFilter::Info}
    }
}
