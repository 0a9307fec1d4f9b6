use std::time::Duration;

use anyhow::Result;
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::GameConfig;
use crate::food::Food;
use crate::render::{Surface, ALERT_COLOR, FOOD_COLOR, HEAD_COLOR, SEGMENT_GAP, SNAKE_COLOR};
use crate::snake::{Cell, Heading, Snake};
use crate::timer::{Scheduler, TimerHandle};

const GAME_OVER_TEXT: &str = "Game Over";
const GAME_OVER_POS: (i64, i64) = (100, 100);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Stopped,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

impl Speed {
    /// Looks a preset up by name. Unknown names fall back to `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "slow" => Speed::Slow,
            "medium" => Speed::Medium,
            "fast" => Speed::Fast,
            other => {
                warn!("Unknown speed preset {:?}, using medium", other);
                Speed::Medium
            }
        }
    }

    pub fn interval(self) -> Duration {
        let millis = match self {
            Speed::Slow => 250,
            Speed::Medium => 150,
            Speed::Fast => 100,
        };
        Duration::from_millis(millis)
    }
}

struct Board {
    snake: Snake,
    food: Food,
}

/// One game session: the snake, its food, and the timer that moves it.
pub struct Game<S: Scheduler> {
    config: GameConfig,
    scheduler: S,
    timer: Option<TimerHandle>,
    status: Status,
    speed: Speed,
    board: Option<Board>,
    rng: StdRng,
}

impl<S: Scheduler> Game<S> {
    pub fn new(config: GameConfig, speed: Speed, scheduler: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Game { config, scheduler, timer: None, status: Status::Stopped, speed, board: None, rng }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.board.as_ref().map(|board| &board.snake)
    }

    #[cfg(test)]
    pub fn food(&self) -> Option<Cell> {
        self.board.as_ref().map(|board| board.food.cell())
    }

    /// Time until the next tick is due, if the game is running.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.timer.and(self.scheduler.until_next())
    }

    pub fn start(&mut self) {
        self.stop_timer();

        let GameConfig { width, height, cell_size, initial_length } = self.config;
        let snake = Snake::create(initial_length);
        let mut food = Food::new();
        food.relocate(width, height, cell_size, &mut self.rng);

        self.board = Some(Board { snake, food });
        self.status = Status::Running;
        self.start_timer();
        info!("Game started at {:?} speed", self.speed);
    }

    pub fn pause(&mut self) {
        if self.board.is_none() {
            warn!("Pause requested before any game was started");
            return;
        }

        self.stop_timer();
        self.status = Status::Paused;
        info!("Game paused");
    }

    pub fn resume(&mut self) {
        if self.status == Status::Running {
            return;
        }
        if self.board.is_none() {
            warn!("Resume requested before any game was started");
            return;
        }

        self.start_timer();
        self.status = Status::Running;
        info!("Game resumed");
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        debug!("Speed set to {:?} ({:?})", speed, speed.interval());

        if self.status == Status::Running {
            self.stop_timer();
            self.start_timer();
        }
    }

    pub fn steer(&mut self, heading: Heading) {
        if let Some(board) = self.board.as_mut() {
            board.snake.set_heading(heading);
        }
    }

    /// Runs one tick for every period that has elapsed on the active timer.
    pub fn run_due_ticks(&mut self, surface: &mut impl Surface) -> Result<()> {
        while let Some(fired) = self.scheduler.next_fired() {
            if self.timer == Some(fired) {
                self.tick(surface)?;
            }
        }

        Ok(())
    }

    pub fn tick(&mut self, surface: &mut impl Surface) -> Result<()> {
        self.update();
        self.render(surface)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn update(&mut self) {
        let GameConfig { width, height, cell_size, .. } = self.config;
        let board = match self.board.as_mut() {
            Some(board) => board,
            None => return,
        };

        let ate = board.snake.head() == board.food.cell();
        if ate {
            debug!("Food eaten at {:?}", board.food.cell());
            board.food.relocate(width, height, cell_size, &mut self.rng);
        }

        board.snake.advance(ate);
    }

    fn render(&mut self, surface: &mut impl Surface) -> Result<()> {
        let GameConfig { width, height, cell_size, .. } = self.config;
        let board = match self.board.as_ref() {
            Some(board) => board,
            None => return Ok(()),
        };

        surface.clear(width, height)?;

        let food = board.food.cell();
        let (fx, fy) = self.to_pixels(food);
        surface.fill_rect(fx, fy, cell_size, FOOD_COLOR)?;

        let head_index = board.snake.len() - 1;
        for (i, cell) in board.snake.body().iter().enumerate() {
            let color = if i == head_index {HEAD_COLOR} else {SNAKE_COLOR};
            let (x, y) = self.to_pixels(*cell);
            surface.fill_rect(x, y, cell_size.saturating_sub(SEGMENT_GAP), color)?;
        }

        let next = board.snake.next_head_position();
        if !self.in_bounds(next) {
            self.stop_timer();
            self.status = Status::Stopped;
            info!("Game over: next head {:?} leaves the board", next);
            surface.draw_text(GAME_OVER_POS.0, GAME_OVER_POS.1, GAME_OVER_TEXT, ALERT_COLOR)?;
        }

        surface.flush()
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        let (x, y) = self.to_pixels(cell);
        (0..i64::from(self.config.width)).contains(&x) && (0..i64::from(self.config.height)).contains(&y)
    }

    fn to_pixels(&self, cell: Cell) -> (i64, i64) {
        let size = i64::from(self.config.cell_size);
        (i64::from(cell.x) * size, i64::from(cell.y) * size)
    }

    fn start_timer(&mut self) {
        self.timer = Some(self.scheduler.schedule(self.speed.interval()));
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }
}
