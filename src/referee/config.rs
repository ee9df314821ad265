use std::collections::HashSet;

use color_eyre::{
    eyre::{bail, ensure},
    Result,
};

use crate::pit::{
    constants::{
        FRAME_RATE,
        GRID_HEIGHT,
        GRID_WIDTH,
        GROWTH_PER_FOOD,
        INITIAL_GROWTH,
        MATCH_SECONDS,
        MAX_FOOD,
        SPAWN_ATTEMPTS,
    },
    grid::Grid,
    types::Coord,
};

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub width:           i64,
    pub height:          i64,
    pub max_food:        usize,
    pub frame_rate:      u64,
    pub match_seconds:   u64,
    pub growth_per_food: u32,
    pub initial_growth:  u32,
    pub spawn_attempts:  u32,
    /// One snake is created per entry, in order.
    pub start_positions: Vec<Coord>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::sized(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl MatchConfig {
    /// Standard rules on a grid of the given size, with the four corner
    /// snakes five cells in from each edge and one in the centre.
    #[must_use]
    pub fn sized(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            max_food: MAX_FOOD,
            frame_rate: FRAME_RATE,
            match_seconds: MATCH_SECONDS,
            growth_per_food: GROWTH_PER_FOOD,
            initial_growth: INITIAL_GROWTH,
            spawn_attempts: SPAWN_ATTEMPTS,
            start_positions: vec![
                Coord::new(5, 5),
                Coord::new(width.saturating_sub(5), 5),
                Coord::new(5, height.saturating_sub(5)),
                Coord::new(width.saturating_sub(5), height.saturating_sub(5)),
                Coord::new(width / 2, height / 2),
            ],
        }
    }

    #[must_use]
    pub fn with_start_positions(mut self, start_positions: Vec<Coord>) -> Self {
        self.start_positions = start_positions;
        self
    }

    #[must_use]
    pub const fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    /// Saturates; `validate` rejects configs where this would overflow.
    #[must_use]
    pub const fn match_duration_ticks(&self) -> u64 {
        self.match_seconds.saturating_mul(self.frame_rate)
    }

    /// # Errors
    ///
    /// Fails if the grid cannot hold the snakes and a full food pool, or if
    /// the timing would make the match end before it starts.
    pub fn validate(&self) -> Result<()> {
        let grid = self.grid();

        ensure!(
            self.width >= 3 && self.height >= 3,
            "grid must be at least 3x3, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.frame_rate > 0, "frame rate must be positive");
        ensure!(self.match_seconds > 0, "match duration must be positive");
        ensure!(
            self.match_seconds.checked_mul(self.frame_rate).is_some(),
            "{} seconds at {} ticks per second is too many ticks",
            self.match_seconds,
            self.frame_rate
        );
        ensure!(
            !self.start_positions.is_empty(),
            "a match needs at least one snake"
        );

        let mut seen = HashSet::new();
        for start in &self.start_positions {
            ensure!(
                grid.contains(*start),
                "start position {start} is outside the {}x{} grid",
                self.width,
                self.height
            );
            ensure!(seen.insert(*start), "start position {start} is used twice");
        }

        let Some(room) = grid.interior_area() else {
            bail!("a {}x{} grid is too large", self.width, self.height);
        };
        let needed = self
            .max_food
            .checked_add(self.start_positions.len())
            .and_then(|n| i64::try_from(n).ok());
        ensure!(
            needed.is_some_and(|needed| room >= needed),
            "a {}x{} grid has room for {room} items but {} food and {} snakes \
             were requested",
            self.width,
            self.height,
            self.max_food,
            self.start_positions.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_classic_arena() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.match_duration_ticks(), 900);
        assert_eq!(
            config.start_positions,
            vec![
                Coord::new(5, 5),
                Coord::new(25, 5),
                Coord::new(5, 25),
                Coord::new(25, 25),
                Coord::new(15, 15),
            ]
        );
    }

    #[test]
    fn rejects_grids_too_small_for_the_match() {
        assert!(MatchConfig::sized(2, 30).validate().is_err());

        // start positions derived for a 4x4 grid fall outside it
        assert!(MatchConfig::sized(4, 4).validate().is_err());

        // 4x4 has a 2x2 interior: not enough for 3 food and 2 snakes
        let config = MatchConfig::sized(4, 4)
            .with_start_positions(vec![Coord::new(0, 0), Coord::new(3, 3)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_and_missing_snakes() {
        let config = MatchConfig::default()
            .with_start_positions(vec![Coord::new(3, 3), Coord::new(3, 3)]);
        assert!(config.validate().is_err());

        let config = MatchConfig::default().with_start_positions(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_a_zero_length_match() {
        let mut config = MatchConfig::default();
        config.match_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_a_match_too_long_to_count() {
        let mut config = MatchConfig::default();
        config.match_seconds = u64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(config.match_duration_ticks(), u64::MAX);
    }

    #[test]
    fn rejects_grids_too_large_to_measure() {
        let config = MatchConfig::sized(i64::MAX, i64::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_an_absurd_food_count() {
        let mut config = MatchConfig::default();
        config.max_food = usize::MAX;
        assert!(config.validate().is_err());
    }
}
