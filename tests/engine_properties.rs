use rand::{Rng, SeedableRng, rngs::StdRng};
use snake_engine::config::{EngineConfig, FoodPlacement};
use snake_engine::game::{EndReason, GameState, GameStatus};
use snake_engine::input::Direction;
use snake_engine::snake::{Position, Snake};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn engine(snake: Snake, food: Position) -> GameState {
    GameState::with_layout(
        EngineConfig::default(),
        snake,
        food,
        StdRng::seed_from_u64(99),
    )
    .expect("valid config")
}

fn segments(points: &[(i32, i32)]) -> Vec<Position> {
    points.iter().map(|&(x, y)| Position { x, y }).collect()
}

#[test]
fn eating_food_grows_snake_and_scores() {
    let mut state = engine(
        Snake::new(Position { x: 10, y: 10 }, Direction::Right),
        Position { x: 11, y: 10 },
    );

    let snapshot = state.tick();

    assert_eq!(snapshot.snake, segments(&[(11, 10), (10, 10)]));
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.status, GameStatus::Running);
    assert!(!snapshot.snake.contains(&snapshot.food));
    assert!(snapshot.food.is_within_bounds(state.bounds()));
}

#[test]
fn leaving_the_grid_ends_game_without_moving() {
    let mut state = engine(
        Snake::new(Position { x: 19, y: 10 }, Direction::Right),
        Position { x: 0, y: 0 },
    );

    let snapshot = state.tick();

    assert_eq!(snapshot.status, GameStatus::Over);
    assert_eq!(snapshot.end_reason, Some(EndReason::WallCollision));
    assert_eq!(snapshot.snake, segments(&[(19, 10)]));
    assert_eq!(snapshot.score, 0);
}

#[test]
fn every_wall_is_fatal() {
    let cases = [
        ((0, 4), Direction::Left),
        ((19, 4), Direction::Right),
        ((4, 0), Direction::Up),
        ((4, 19), Direction::Down),
    ];

    for ((x, y), direction) in cases {
        let mut state = engine(Snake::new(Position { x, y }, direction), Position { x: 9, y: 9 });

        let snapshot = state.tick();

        assert_eq!(snapshot.status, GameStatus::Over, "{direction:?} from ({x}, {y})");
        assert_eq!(snapshot.snake, segments(&[(x, y)]));
    }
}

#[test]
fn turning_into_body_ends_game() {
    let mut state = engine(
        Snake::from_segments(
            segments(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]),
            Direction::Left,
        ),
        Position { x: 0, y: 0 },
    );
    let before = state.snapshot();

    state.submit_direction(Direction::Down);
    let snapshot = state.tick();

    assert_eq!(snapshot.status, GameStatus::Over);
    assert_eq!(snapshot.end_reason, Some(EndReason::SelfCollision));
    assert_eq!(snapshot.snake, before.snake);
    assert_eq!(snapshot.score, before.score);
}

#[test]
fn reversal_into_neck_is_rejected() {
    let mut state = engine(
        Snake::from_segments(segments(&[(5, 5), (4, 5), (3, 5)]), Direction::Right),
        Position { x: 0, y: 0 },
    );

    state.submit_direction(Direction::Left);
    assert_eq!(state.snake().pending_direction(), None);

    let snapshot = state.tick();
    assert_eq!(snapshot.status, GameStatus::Running);
    assert_eq!(snapshot.direction, Direction::Right);
    assert_eq!(snapshot.head(), Position { x: 6, y: 5 });
}

#[test]
fn only_last_direction_before_tick_applies() {
    let mut state = engine(
        Snake::from_segments(segments(&[(5, 5), (4, 5), (3, 5)]), Direction::Right),
        Position { x: 0, y: 0 },
    );

    state.submit_direction(Direction::Up);
    state.submit_direction(Direction::Down);
    let snapshot = state.tick();

    assert_eq!(snapshot.head(), Position { x: 5, y: 6 });
    assert_eq!(snapshot.direction, Direction::Down);
}

#[test]
fn double_press_cannot_reverse_within_one_tick() {
    // Up then Left would be a U-turn in two ticks' worth of input; only one
    // change is applied, and Left is a reversal of the committed Right.
    let mut state = engine(
        Snake::from_segments(segments(&[(5, 5), (4, 5), (3, 5)]), Direction::Right),
        Position { x: 0, y: 0 },
    );

    state.submit_direction(Direction::Up);
    state.submit_direction(Direction::Left);
    let snapshot = state.tick();

    assert_eq!(snapshot.status, GameStatus::Running);
    assert_eq!(snapshot.head(), Position { x: 5, y: 4 });
}

#[test]
fn ticks_after_game_over_change_nothing() {
    let mut state = engine(
        Snake::new(Position { x: 19, y: 10 }, Direction::Right),
        Position { x: 0, y: 0 },
    );
    let over = state.tick();
    assert_eq!(over.status, GameStatus::Over);

    state.submit_direction(Direction::Up);
    for _ in 0..5 {
        assert_eq!(state.tick(), over);
    }
    assert_eq!(state.snapshot(), over);
}

#[test]
fn body_length_changes_only_by_eating() {
    let mut state = GameState::new_with_seed(EngineConfig::default(), 2024).expect("valid config");
    let mut inputs = StdRng::seed_from_u64(7);
    state.start();

    for _ in 0..5_000 {
        if inputs.gen_bool(0.3) {
            state.submit_direction(DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())]);
        }

        let before = state.snapshot();
        let after = state.tick();

        match after.status {
            GameStatus::Over => {
                assert_eq!(after.snake, before.snake);
                assert_eq!(after.score, before.score);
                state.reset();
            }
            _ if after.score > before.score => {
                assert_eq!(after.score, before.score + 10);
                assert_eq!(after.snake.len(), before.snake.len() + 1);
                assert_eq!(after.head(), before.food);
            }
            _ => {
                assert_eq!(after.snake.len(), before.snake.len());
                assert_eq!(after.food, before.food);
            }
        }
    }
}

#[test]
fn hardened_food_never_spawns_inside_snake() {
    let mut state = GameState::new_with_seed(EngineConfig::default(), 31).expect("valid config");
    let mut inputs = StdRng::seed_from_u64(17);
    state.start();

    for _ in 0..5_000 {
        state.submit_direction(DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())]);
        let snapshot = state.tick();

        assert!(!snapshot.snake.contains(&snapshot.food));
        if snapshot.status == GameStatus::Over {
            state.reset();
        }
    }
}

#[test]
fn unguarded_food_stays_on_grid() {
    let config = EngineConfig {
        food_placement: FoodPlacement::Unguarded,
        ..EngineConfig::default()
    };
    let mut state = GameState::with_layout(
        config,
        Snake::new(Position { x: 10, y: 10 }, Direction::Right),
        Position { x: 11, y: 10 },
        StdRng::seed_from_u64(3),
    )
    .expect("valid config");

    let snapshot = state.tick();

    assert_eq!(snapshot.score, 10);
    assert!(snapshot.food.is_within_bounds(state.bounds()));
}
