use std::collections::VecDeque;

use log::debug;
use rand::{Rng, RngCore};
use serde::Serialize;

use super::{food::FoodPool, game::Game, SnakeID};
use crate::pit::types::{Coord, Direction};

/// Traits drawn once when a snake is created.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Personality {
    pub aggressiveness: f64,
    pub carefulness:    f64,
    pub food_priority:  f64,
    pub intelligence:   f64,
}

impl Personality {
    /// Snake 0 is the designated smart one and always draws a higher
    /// intelligence.
    pub fn random(id: SnakeID, rng: &mut dyn RngCore) -> Self {
        let intelligence = if id == 0 {
            rng.gen_range(0.7..0.9)
        } else {
            rng.gen_range(0.5..0.8)
        };

        Self {
            aggressiveness: rng.gen_range(0.2..0.8),
            carefulness: rng.gen_range(0.3..0.9),
            food_priority: rng.gen_range(0.6..1.0),
            intelligence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Moved,
    Ate,
    Died,
}

#[derive(Clone, Debug)]
pub struct Snake {
    pub id:           SnakeID,
    pub color:        [u8; 3],
    pub body:         VecDeque<Coord>,
    pub heading:      Direction,
    pub alive:        bool,
    pub grow_pending: u32,
    pub personality:  Personality,
}

impl Snake {
    #[must_use]
    pub fn new(
        id: SnakeID,
        color: [u8; 3],
        start: Coord,
        grow_pending: u32,
        personality: Personality,
    ) -> Self {
        Self {
            id,
            color,
            body: VecDeque::from([start]),
            heading: Direction::Right,
            alive: true,
            grow_pending,
            personality,
        }
    }

    #[must_use]
    pub fn head(&self) -> Coord {
        self.body[0]
    }

    /// Cells that will still be occupied after this snake's next move. The
    /// tail vacates unless the snake is growing.
    pub fn blocking_cells(&self) -> impl Iterator<Item = &Coord> {
        let keep = if self.grow_pending > 0 {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(keep)
    }

    /// Moves one cell along `heading`. `board` is the state the move is
    /// checked against; it is normally the board as it stood before this
    /// tick's motion, with deaths from earlier in the tick applied.
    pub fn advance(
        &mut self,
        board: &Game,
        food: &mut FoodPool,
        growth_per_food: u32,
    ) -> Motion {
        if !self.alive {
            return Motion::Died;
        }

        let new_head = self.head().neighbour(self.heading);
        if board.would_die(self, new_head) {
            debug!(
                "snake {} dies moving {} into {new_head}",
                self.id, self.heading
            );
            self.alive = false;
            return Motion::Died;
        }

        self.body.push_front(new_head);

        let ate = food.consume(new_head);
        if ate {
            debug!("snake {} eats food at {new_head}", self.id);
            self.grow_pending += growth_per_food;
        }

        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.body.pop_back();
        }

        if ate {
            Motion::Ate
        } else {
            Motion::Moved
        }
    }
}
