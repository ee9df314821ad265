use std::fmt;

use crate::pit::{snake::Personality, types::Direction};

#[derive(Debug, Clone, Copy)]
pub struct ScoreFactors {
    pub direction:     Direction,
    pub lethal:        bool,
    pub food_distance: i64,
    pub safety:        usize,
    pub towards_food:  bool,
    pub jitter:        f64,
}

impl ScoreFactors {
    pub const LETHAL_SCORE: f64 = -1000.0;
    const SAFETY_WEIGHT: f64 = 10.0;
    const TOWARDS_FOOD_WEIGHT: f64 = 20.0;
    pub const JITTER: f64 = 5.0;

    pub const fn alive(
        direction: Direction,
        food_distance: i64,
        safety: usize,
        towards_food: bool,
        jitter: f64,
    ) -> Self {
        Self {
            direction,
            lethal: false,
            food_distance,
            safety,
            towards_food,
            jitter,
        }
    }

    pub const fn lethal(direction: Direction) -> Self {
        Self {
            direction,
            lethal: true,
            food_distance: 0,
            safety: 0,
            towards_food: false,
            jitter: 0.0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn calculate(&self, personality: &Personality) -> f64 {
        if self.lethal {
            return Self::LETHAL_SCORE;
        }

        let towards = if self.towards_food {
            Self::TOWARDS_FOOD_WEIGHT * personality.intelligence
        } else {
            0.0
        };

        -(self.food_distance as f64) * personality.food_priority
            + self.safety as f64 * personality.carefulness * Self::SAFETY_WEIGHT
            + towards
            + self.jitter
    }
}

impl fmt::Display for ScoreFactors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.lethal {
            write!(f, "{} is lethal", self.direction)
        } else {
            write!(
                f,
                "{}: {} from food, {} safe neighbours, {}towards food, jitter \
                 {:.2}",
                self.direction,
                self.food_distance,
                self.safety,
                if self.towards_food { "" } else { "not " },
                self.jitter
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Personality = Personality {
        aggressiveness: 0.5,
        carefulness:    0.5,
        food_priority:  1.0,
        intelligence:   0.5,
    };

    #[test]
    fn composite_score() {
        let factors = ScoreFactors::alive(Direction::Up, 4, 3, true, 1.5);
        // -4 + 3 * 0.5 * 10 + 20 * 0.5 + 1.5
        assert!((factors.calculate(&P) - 22.5).abs() < 1e-9);
    }

    #[test]
    fn lethal_moves_get_the_sentinel() {
        let factors = ScoreFactors::lethal(Direction::Down);
        assert!((factors.calculate(&P) - ScoreFactors::LETHAL_SCORE).abs() < 1e-9);
    }
}
