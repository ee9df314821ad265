pub const GRID_WIDTH: i64 = 30;
pub const GRID_HEIGHT: i64 = 30;

/// Logical ticks per second.
pub const FRAME_RATE: u64 = 15;
pub const MATCH_SECONDS: u64 = 60;

pub const MAX_FOOD: usize = 3;
pub const SPAWN_ATTEMPTS: u32 = 100;

pub const GROWTH_PER_FOOD: u32 = 3;
/// Snakes spawn as a single cell and grow into their starting length.
pub const INITIAL_GROWTH: u32 = 2;

pub const SNAKE_COUNT: usize = 5;

pub const SNAKE_COLORS: [[u8; 3]; SNAKE_COUNT] = [
    [255, 50, 50],
    [50, 255, 50],
    [50, 50, 255],
    [255, 255, 50],
    [255, 50, 255],
];
