pub mod constants;
pub mod food;
pub mod game;
pub mod grid;
pub mod models;
pub mod snake;
pub mod types;
pub mod utils;

/// Stable index of a snake within its match.
pub type SnakeID = usize;
