use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{ConfigError, EngineConfig, GridSize};
use crate::food;
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Initial state; ticks and input are ignored.
    Idle,
    Running,
    /// Terminal until the next start or reset.
    Over,
}

/// Why a game reached [`GameStatus::Over`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell and no food can be placed.
    BoardFilled,
}

/// Read-only view of the engine handed to observers.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    /// Segments from head to tail.
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    #[serde(rename = "state")]
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub direction: Direction,
    /// Number of ticks that moved the snake since the last reset.
    pub tick: u64,
}

impl Snapshot {
    /// Returns the head segment.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake[0]
    }
}

/// Complete simulation state for one session.
///
/// The engine does not own time: a host calls [`GameState::tick`] on a fixed
/// period and forwards key presses to [`GameState::submit_direction`]. Both
/// take `&mut self`, so a host with real concurrency has to put the state
/// behind a single lock.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: EngineConfig,
    snake: Snake,
    food: Position,
    score: u32,
    tick_count: u64,
    status: GameStatus,
    end_reason: Option<EndReason>,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates an idle engine seeded from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::new_with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic idle engine for tests and reproducible runs.
    pub fn new_with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new_with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Creates an idle engine drawing food positions from `rng`.
    pub fn new_with_rng(config: EngineConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::from_segments(config.initial_segments(), config.initial_direction);
        let food = food::spawn_position(&mut rng, config.grid, &snake, config.food_placement)
            .ok_or(ConfigError::SnakeDoesNotFit {
                length: config.initial_length,
                width: config.grid.width,
                height: config.grid.height,
            })?;

        Ok(Self {
            config,
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Idle,
            end_reason: None,
            rng,
        })
    }

    /// Creates a running engine from an explicit snake and food layout.
    ///
    /// The config is validated so a later reset lands on a playable board.
    /// The caller is responsible for the layout being reachable: every
    /// segment inside the grid and no segment repeated.
    pub fn with_layout(
        config: EngineConfig,
        snake: Snake,
        food: Position,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            end_reason: None,
            rng,
        })
    }

    /// Moves an idle or finished game into [`GameStatus::Running`].
    ///
    /// A finished game is reinitialized first. Has no effect while running.
    pub fn start(&mut self) {
        match self.status {
            GameStatus::Idle => {
                debug!("game started");
                self.status = GameStatus::Running;
            }
            GameStatus::Over => self.reset(),
            GameStatus::Running => {}
        }
    }

    /// Reinitializes every entity and resumes running, from any state.
    pub fn reset(&mut self) {
        self.reinitialize();
        self.status = GameStatus::Running;
        debug!("game reset");
    }

    /// Reinitializes every entity and waits in [`GameStatus::Idle`].
    pub fn reset_idle(&mut self) {
        self.reinitialize();
        self.status = GameStatus::Idle;
    }

    /// Buffers a direction for the next tick.
    ///
    /// Ignored unless running; an exact reversal of the current direction is
    /// discarded once the snake is longer than one segment.
    pub fn submit_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if !self.snake.buffer_direction(direction) {
            trace!(?direction, "discarded reversal");
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.submit_direction(direction),
            GameInput::Confirm => self.start(),
            GameInput::Reset => self.reset(),
            GameInput::Quit => {}
        }
    }

    /// Advances the simulation by one step and returns the resulting snapshot.
    ///
    /// A no-op unless running. A colliding step only flips the status.
    pub fn tick(&mut self) -> Snapshot {
        if self.status != GameStatus::Running {
            return self.snapshot();
        }

        let next_head = self.snake.next_head_position();
        if let Some(reason) = self.collision_at(next_head) {
            self.finish(reason);
            return self.snapshot();
        }

        let ate = next_head == self.food;
        self.snake.advance(ate);
        self.tick_count += 1;

        if ate {
            self.score = self.score.saturating_add(self.config.growth_reward);
            debug!(
                score = self.score,
                length = self.snake.len(),
                "snake ate food"
            );

            match food::spawn_position(
                &mut self.rng,
                self.config.grid,
                &self.snake,
                self.config.food_placement,
            ) {
                Some(position) => self.food = position,
                None => self.finish(EndReason::BoardFilled),
            }
        }

        self.snapshot()
    }

    /// Returns a read-only copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
            end_reason: self.end_reason,
            direction: self.snake.direction(),
            tick: self.tick_count,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    // Checked against the full pre-move body: entering the cell the tail is
    // about to leave is still fatal.
    fn collision_at(&self, next_head: Position) -> Option<EndReason> {
        if !next_head.is_within_bounds(self.config.grid) {
            return Some(EndReason::WallCollision);
        }

        if self.snake.occupies(next_head) {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    fn finish(&mut self, reason: EndReason) {
        debug!(?reason, score = self.score, "game over");
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);
    }

    fn reinitialize(&mut self) {
        self.snake = Snake::from_segments(
            self.config.initial_segments(),
            self.config.initial_direction,
        );
        // Validated configs always leave a free cell for the first food.
        if let Some(position) = food::spawn_position(
            &mut self.rng,
            self.config.grid,
            &self.snake,
            self.config.food_placement,
        ) {
            self.food = position;
        }
        self.score = 0;
        self.tick_count = 0;
        self.end_reason = None;
    }
}
