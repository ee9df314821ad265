use log::{debug, trace};
use rand::{Rng, RngCore};

use super::{grid::Grid, snake::Snake};
use crate::pit::types::Coord;

/// The food currently on the board, kept topped up to `capacity`.
#[derive(Clone, Debug)]
pub struct FoodPool {
    pub items:          Vec<Coord>,
    pub capacity:       usize,
    pub spawn_attempts: u32,
}

impl FoodPool {
    #[must_use]
    pub const fn new(capacity: usize, spawn_attempts: u32) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            spawn_attempts,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.items.contains(&coord)
    }

    /// Rejection-samples an interior cell that holds neither food nor any
    /// part of any snake, living or dead. `None` means the attempt budget ran
    /// out.
    pub fn spawn_one(
        &self,
        grid: &Grid,
        snakes: &[Snake],
        rng: &mut dyn RngCore,
    ) -> Option<Coord> {
        if grid.interior_area() == Some(0) {
            return None;
        }

        for _ in 0..self.spawn_attempts {
            let candidate = Coord {
                x: rng.gen_range(1..grid.width - 1),
                y: rng.gen_range(1..grid.height - 1),
            };

            if self.contains(candidate) {
                continue;
            }

            if snakes.iter().any(|snake| snake.body.contains(&candidate)) {
                continue;
            }

            return Some(candidate);
        }

        None
    }

    /// Tops the pool up to capacity. Stops early if the grid is too crowded
    /// to find a vacancy; the next call will try again. Returns the number of
    /// items placed.
    pub fn maintain(
        &mut self,
        grid: &Grid,
        snakes: &[Snake],
        rng: &mut dyn RngCore,
    ) -> usize {
        let mut placed = 0;
        while self.items.len() < self.capacity {
            match self.spawn_one(grid, snakes, rng) {
                Some(coord) => {
                    trace!("food placed at {coord}");
                    self.items.push(coord);
                    placed += 1;
                },
                None => {
                    debug!(
                        "no vacancy for food after {} attempts, {} of {} placed",
                        self.spawn_attempts,
                        self.items.len(),
                        self.capacity
                    );
                    break;
                },
            }
        }
        placed
    }

    pub fn consume(&mut self, coord: Coord) -> bool {
        match self.items.iter().position(|food| *food == coord) {
            Some(index) => {
                self.items.remove(index);
                true
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::pit::snake::Personality;

    fn snake_over(cells: impl IntoIterator<Item = Coord>) -> Snake {
        let mut snake = Snake::new(
            0,
            [0, 0, 0],
            Coord::new(0, 0),
            0,
            Personality {
                aggressiveness: 0.5,
                carefulness:    0.5,
                food_priority:  0.8,
                intelligence:   0.7,
            },
        );
        snake.body = cells.into_iter().collect();
        snake
    }

    #[test]
    fn maintain_fills_to_capacity_inside_the_ring() {
        let grid = Grid::new(30, 30);
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = FoodPool::new(3, 100);

        assert_eq!(pool.maintain(&grid, &[], &mut rng), 3);
        assert_eq!(pool.len(), 3);
        for food in &pool.items {
            assert!(food.x >= 1 && food.x <= 28);
            assert!(food.y >= 1 && food.y <= 28);
        }

        assert_eq!(pool.maintain(&grid, &[], &mut rng), 0);
    }

    #[test]
    fn food_never_lands_on_snakes_or_other_food() {
        // 5x5 grid has a 3x3 interior; cover all but one cell with a snake.
        let grid = Grid::new(5, 5);
        let free = Coord::new(2, 2);
        let cells = (1..4)
            .flat_map(|y| (1..4).map(move |x| Coord::new(x, y)))
            .filter(|c| *c != free);
        let snakes = [snake_over(cells)];
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = FoodPool::new(3, 10_000);

        pool.maintain(&grid, &snakes, &mut rng);
        assert_eq!(pool.items, vec![free]);
    }

    #[test]
    fn saturated_grid_gives_up_quietly() {
        let grid = Grid::new(3, 3);
        let snakes = [snake_over([Coord::new(1, 1)])];
        let mut rng = StdRng::seed_from_u64(9);
        let mut pool = FoodPool::new(3, 100);

        assert_eq!(pool.spawn_one(&grid, &snakes, &mut rng), None);
        assert_eq!(pool.maintain(&grid, &snakes, &mut rng), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn consume_removes_exactly_one() {
        let mut pool = FoodPool::new(3, 100);
        pool.items = vec![Coord::new(1, 1), Coord::new(2, 2)];

        assert!(pool.consume(Coord::new(2, 2)));
        assert!(!pool.consume(Coord::new(2, 2)));
        assert!(!pool.consume(Coord::new(5, 5)));
        assert_eq!(pool.items, vec![Coord::new(1, 1)]);
    }
}
