//! Headless Snake simulation engine.
//!
//! [`game::GameState`] owns all simulation state and advances it one step per
//! [`game::GameState::tick`]. Time and input are supplied by the host: see
//! [`clock::TickClock`] and [`input::InputHandler`] for the terminal host used
//! by the bundled binary.

pub mod clock;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod script;
pub mod snake;
pub mod terminal_runtime;
