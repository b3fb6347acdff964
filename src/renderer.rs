use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::GridSize;
use crate::game::{EndReason, GameStatus, Snapshot};
use crate::input::Direction;
use crate::snake::Position;

const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_FOOD: &str = "●";

/// Renders one frame from an engine snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, bounds: GridSize) {
    let [board_row, status_row] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    // Borders take one cell on every side.
    let board_area = Rect {
        width: board_row.width.min(bounds.width.saturating_add(2)),
        height: board_row.height.min(bounds.height.saturating_add(2)),
        ..board_row
    };

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::White));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, bounds, snapshot.food);
    render_snake(frame, inner, bounds, snapshot);

    frame.render_widget(
        Paragraph::new(Line::from(status_text(snapshot)))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray)),
        status_row,
    );
}

/// Returns the one-line status shown below the board.
#[must_use]
pub fn status_text(snapshot: &Snapshot) -> String {
    let counters = format!("Score: {}  Length: {}", snapshot.score, snapshot.snake.len());

    match snapshot.status {
        GameStatus::Idle => format!("{counters}  [Enter] Start  [Q] Quit"),
        GameStatus::Running => format!("{counters}  [R] Reset  [Q] Quit"),
        GameStatus::Over => {
            let cause = match snapshot.end_reason {
                Some(EndReason::WallCollision) => "hit wall",
                Some(EndReason::SelfCollision) => "hit yourself",
                Some(EndReason::BoardFilled) => "board filled",
                None => "game over",
            };
            format!("{counters}  GAME OVER ({cause})  [Enter] Play again  [Q] Quit")
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, food: Position) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, snapshot: &Snapshot) {
    let buffer = frame.buffer_mut();

    // Tail first so the head is drawn last when food sits under it.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(snapshot.direction),
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
