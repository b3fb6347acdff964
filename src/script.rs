//! Headless scripted runs: one move character per tick.
//!
//! `U`, `D`, `L` and `R` submit a direction before the tick, `.` submits
//! nothing. Letters are case-insensitive and whitespace is skipped, so
//! scripts can be grouped for readability (`"RRR.. UUL"`).

use rand::Rng;
use thiserror::Error;

use crate::game::{GameState, GameStatus, Snapshot};
use crate::input::Direction;

/// One scripted tick: an optional direction submitted before ticking.
pub type ScriptedMove = Option<Direction>;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ScriptError {
    #[error("invalid move {found:?} at position {index}, expected one of U, D, L, R or '.'")]
    InvalidMove { index: usize, found: char },
}

/// Parses a move script into per-tick inputs.
pub fn parse_script(script: &str) -> Result<Vec<ScriptedMove>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, found)| !found.is_whitespace())
        .map(|(index, found)| match found.to_ascii_uppercase() {
            'U' => Ok(Some(Direction::Up)),
            'D' => Ok(Some(Direction::Down)),
            'L' => Ok(Some(Direction::Left)),
            'R' => Ok(Some(Direction::Right)),
            '.' => Ok(None),
            _ => Err(ScriptError::InvalidMove { index, found }),
        })
        .collect()
}

/// Starts `state` and plays `moves`, returning the snapshot after each tick.
///
/// Stops after the tick that ends the game.
pub fn run_script<R: Rng>(state: &mut GameState<R>, moves: &[ScriptedMove]) -> Vec<Snapshot> {
    state.start();

    let mut snapshots = Vec::with_capacity(moves.len());
    for scripted in moves {
        if let Some(direction) = scripted {
            state.submit_direction(*direction);
        }

        let snapshot = state.tick();
        let finished = snapshot.status == GameStatus::Over;
        snapshots.push(snapshot);
        if finished {
            break;
        }
    }

    snapshots
}
