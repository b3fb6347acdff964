use rand::Rng;

use crate::config::{FoodPlacement, GridSize};
use crate::snake::{Position, Snake};

/// Picks a food position according to `placement`.
///
/// Returns `None` only under [`FoodPlacement::AvoidSnake`] when the snake
/// covers every cell.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    placement: FoodPlacement,
) -> Option<Position> {
    match placement {
        FoodPlacement::AvoidSnake => spawn_free_position(rng, bounds, snake),
        FoodPlacement::Unguarded => Some(spawn_any_position(rng, bounds)),
    }
}

/// Uniform draw over cells not occupied by the snake.
fn spawn_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

/// Uniform draw over the whole grid, snake or not.
fn spawn_any_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}
