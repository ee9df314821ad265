use std::fmt;

use super::{
    constants::{MAX_FOOD, SPAWN_ATTEMPTS},
    food::FoodPool,
    grid::Grid,
    snake::Snake,
};
use crate::pit::{types::Coord, utils::manhattan_distance};

/// Everything a snake can see when deciding or moving.
#[derive(Clone, Debug)]
pub struct Game {
    pub grid:   Grid,
    pub snakes: Vec<Snake>,
    pub food:   FoodPool,
}

impl Game {
    #[must_use]
    pub const fn new(grid: Grid, snakes: Vec<Snake>) -> Self {
        Self {
            grid,
            snakes,
            food: FoodPool::new(MAX_FOOD, SPAWN_ATTEMPTS),
        }
    }

    #[must_use]
    pub fn with_food(mut self, food: FoodPool) -> Self {
        self.food = food;
        self
    }

    /// Would `me` die if its head entered `pos`? Only living snakes block;
    /// the corpses of dead snakes are ignored.
    #[must_use]
    pub fn would_die(&self, me: &Snake, pos: Coord) -> bool {
        if !self.grid.contains(pos) {
            return true;
        }

        if me.blocking_cells().any(|c| *c == pos) {
            return true;
        }

        self.snakes
            .iter()
            .filter(|other| other.id != me.id && other.alive)
            .any(|other| other.body.contains(&pos))
    }

    /// How many of the four cells around `pos` could `me` survive entering.
    #[must_use]
    pub fn safety_count(&self, me: &Snake, pos: Coord) -> usize {
        pos.neighbours()
            .filter(|n| !self.would_die(me, *n))
            .count()
    }

    /// Closest food by manhattan distance; the first one wins a tie.
    #[must_use]
    pub fn nearest_food(&self, from: Coord) -> Option<Coord> {
        let mut nearest: Option<(Coord, i64)> = None;
        for food in &self.food.items {
            let distance = manhattan_distance(from, *food);
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((*food, distance));
            }
        }
        nearest.map(|(food, _)| food)
    }

    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.snakes.iter().all(|snake| !snake.alive)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let c = Coord { x, y };
                let occupant =
                    self.snakes.iter().find(|snake| snake.body.contains(&c));
                match occupant {
                    Some(snake) if snake.head() == c => {
                        write!(f, "{}", snake.id % 10)?;
                    },
                    Some(snake) if snake.alive => write!(f, "#")?,
                    Some(_) => write!(f, "x")?,
                    None if self.food.contains(c) => write!(f, "*")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pit::snake::Personality;

    fn snake(id: usize, body: &[(i64, i64)]) -> Snake {
        let mut s = Snake::new(
            id,
            [0, 0, 0],
            Coord::new(body[0].0, body[0].1),
            0,
            Personality {
                aggressiveness: 0.5,
                carefulness:    0.5,
                food_priority:  0.8,
                intelligence:   0.7,
            },
        );
        s.body = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        s
    }

    #[test]
    fn walls_are_lethal() {
        let me = snake(0, &[(0, 0)]);
        let game = Game::new(Grid::new(5, 5), vec![me.clone()]);
        assert!(game.would_die(&me, Coord::new(-1, 0)));
        assert!(game.would_die(&me, Coord::new(0, -1)));
        assert!(!game.would_die(&me, Coord::new(1, 0)));
    }

    #[test]
    fn own_tail_is_safe_only_when_not_growing() {
        // a 2x2 loop: head at (1,1), tail at (1,2) right below it
        let mut me = snake(0, &[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let game = Game::new(Grid::new(5, 5), vec![me.clone()]);
        assert!(!game.would_die(&me, Coord::new(1, 2)));
        assert!(game.would_die(&me, Coord::new(2, 1)));

        me.grow_pending = 1;
        assert!(game.would_die(&me, Coord::new(1, 2)));
    }

    #[test]
    fn other_living_bodies_block_but_corpses_do_not() {
        let me = snake(0, &[(0, 0)]);
        let mut other = snake(1, &[(2, 0), (3, 0)]);
        let game = Game::new(Grid::new(5, 5), vec![me.clone(), other.clone()]);
        // tails of other snakes are never exempt
        assert!(game.would_die(&me, Coord::new(3, 0)));
        assert!(game.would_die(&me, Coord::new(2, 0)));

        other.alive = false;
        let game = Game::new(Grid::new(5, 5), vec![me.clone(), other]);
        assert!(!game.would_die(&me, Coord::new(2, 0)));
    }

    #[test]
    fn safety_counts_survivable_neighbours() {
        let me = snake(0, &[(0, 0)]);
        let game = Game::new(Grid::new(5, 5), vec![me.clone()]);
        assert_eq!(game.safety_count(&me, Coord::new(0, 1)), 3);
        assert_eq!(game.safety_count(&me, Coord::new(2, 2)), 4);
    }

    #[test]
    fn nearest_food_prefers_the_first_on_a_tie() {
        let mut game = Game::new(Grid::new(10, 10), vec![]);
        assert_eq!(game.nearest_food(Coord::new(5, 5)), None);

        game.food.items =
            vec![Coord::new(8, 5), Coord::new(5, 2), Coord::new(1, 1)];
        assert_eq!(game.nearest_food(Coord::new(5, 5)), Some(Coord::new(8, 5)));
    }
}
