use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Side length of the default square grid.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Fixed tick period of the reference clock in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Score granted for each food consumed.
pub const GROWTH_REWARD: u32 = 10;

/// Segment count of a freshly created snake.
pub const INITIAL_SNAKE_LENGTH: usize = 1;

/// Heading of a freshly created snake, the unit vector `(+1, 0)`.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Logical grid dimensions passed through the engine as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a square grid of `side` cells per axis.
    #[must_use]
    pub const fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the cell a new snake's head starts on.
    #[must_use]
    pub fn origin(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// How a new food position is chosen.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPlacement {
    /// Uniform over the cells not covered by the snake.
    #[default]
    AvoidSnake,
    /// Uniform over the whole grid; food may land inside the snake.
    Unguarded,
}

/// Immutable engine configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub growth_reward: u32,
    pub initial_length: usize,
    pub initial_direction: Direction,
    pub tick_interval_ms: u64,
    pub food_placement: FoodPlacement,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            growth_reward: GROWTH_REWARD,
            initial_length: INITIAL_SNAKE_LENGTH,
            initial_direction: INITIAL_DIRECTION,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_placement: FoodPlacement::default(),
        }
    }
}

/// Reasons a configuration cannot be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid must have at least one cell on each axis, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("initial snake length must be at least one segment")]
    ZeroInitialLength,
    #[error("initial snake of {length} segments does not fit a {width}x{height} grid")]
    SnakeDoesNotFit {
        length: usize,
        width: u16,
        height: u16,
    },
}

impl EngineConfig {
    /// Loads a JSON config file; absent fields take their default values.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that an engine can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        let does_not_fit = ConfigError::SnakeDoesNotFit {
            length: self.initial_length,
            width: self.grid.width,
            height: self.grid.height,
        };

        // A full board leaves no cell for the first food. Checked before the
        // segments are built so an oversized length never allocates.
        if self.initial_length >= self.grid.total_cells() {
            return Err(does_not_fit);
        }

        let fits = self
            .initial_segments()
            .iter()
            .all(|segment| segment.is_within_bounds(self.grid));
        if !fits {
            return Err(does_not_fit);
        }

        Ok(())
    }

    /// Returns the starting body, head first, trailing behind the origin.
    #[must_use]
    pub fn initial_segments(&self) -> Vec<Position> {
        let origin = self.grid.origin();
        let behind = self.initial_direction.opposite();

        let mut segments = Vec::with_capacity(self.initial_length);
        let mut position = origin;
        for _ in 0..self.initial_length {
            segments.push(position);
            position = position.step(behind);
        }
        segments
    }

    /// Returns the fixed tick period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
