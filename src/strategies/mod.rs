pub mod greedy;

pub use greedy::Greedy;
use rand::RngCore;

use crate::pit::{game::Game, snake::Snake, types::Direction};

pub trait Strategy: Send + Sync {
    /// Picks the heading `snake` should take this tick. `game` is the board as
    /// it stood before anyone moved; implementations must not return the
    /// reverse of the current heading.
    fn get_movement(
        &self,
        game: &Game,
        snake: &Snake,
        rng: &mut dyn RngCore,
    ) -> Direction;
}
