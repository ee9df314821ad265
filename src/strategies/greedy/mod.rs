mod score_factors;

use log::trace;
use rand::{seq::SliceRandom, Rng, RngCore};

pub use self::score_factors::ScoreFactors;
use super::Strategy;
use crate::pit::{
    game::Game,
    snake::Snake,
    types::{Coord, Direction},
    utils::manhattan_distance,
};

/// One-step lookahead: chase the nearest food, prefer roomy cells, never
/// reverse, and add a little noise so snakes don't move in lockstep.
pub struct Greedy;

impl Greedy {
    pub fn score_factors(
        game: &Game,
        snake: &Snake,
        target: Coord,
        rng: &mut dyn RngCore,
    ) -> Vec<ScoreFactors> {
        let head = snake.head();
        Direction::turns_from(snake.heading)
            .map(|direction| {
                let new_head = head.neighbour(direction);
                if game.would_die(snake, new_head) {
                    return ScoreFactors::lethal(direction);
                }

                ScoreFactors::alive(
                    direction,
                    manhattan_distance(new_head, target),
                    game.safety_count(snake, new_head),
                    direction.heads_towards(head, target),
                    rng.gen_range(-ScoreFactors::JITTER..ScoreFactors::JITTER),
                )
            })
            .collect()
    }
}

impl Strategy for Greedy {
    fn get_movement(
        &self,
        game: &Game,
        snake: &Snake,
        rng: &mut dyn RngCore,
    ) -> Direction {
        let Some(target) = game.nearest_food(snake.head()) else {
            trace!("snake {} sees no food, holding {}", snake.id, snake.heading);
            return snake.heading;
        };

        let mut best: Option<(Direction, f64)> = None;
        for factors in Self::score_factors(game, snake, target, rng) {
            trace!("snake {} considers {factors}", snake.id);
            if factors.lethal {
                continue;
            }

            let score = factors.calculate(&snake.personality);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((factors.direction, score));
            }
        }

        if let Some((direction, score)) = best {
            trace!(
                "snake {} heads {direction} towards {target} ({score:.2})",
                snake.id
            );
            return direction;
        }

        // boxed in: go somewhere, but never straight back into our own neck
        let turns: Vec<_> = Direction::turns_from(snake.heading).collect();
        let forced = turns.choose(rng).copied().unwrap_or(snake.heading);
        trace!("snake {} has no safe move, forced {forced}", snake.id);
        forced
    }
}
