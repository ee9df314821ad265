use std::{fmt, slice::Iter};

use serde::{Deserialize, Serialize};

/// Screen-oriented: `Up` decreases y, `Down` increases it.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub fn iter() -> Iter<'static, Direction> {
        static DIRECTIONS: [Direction; 4] = [
            Direction::Right,
            Direction::Left,
            Direction::Down,
            Direction::Up,
        ];
        DIRECTIONS.iter()
    }

    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }

    /// Every direction except the reverse of `heading`, in evaluation order.
    pub fn turns_from(heading: Direction) -> impl Iterator<Item = Direction> {
        Direction::iter()
            .copied()
            .filter(move |d| *d != heading.opposite())
    }

    /// True if stepping this way from `from` closes the gap to `to` along the
    /// axis this direction moves on.
    #[must_use]
    pub const fn heads_towards(self, from: Coord, to: Coord) -> bool {
        match self {
            Direction::Right => to.x > from.x,
            Direction::Left => to.x < from.x,
            Direction::Down => to.y > from.y,
            Direction::Up => to.y < from.y,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Left => "Left",
                Direction::Right => "Right",
                Direction::Up => "Up",
                Direction::Down => "Down",
            }
        )
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Coord {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn neighbour(&self, direction: Direction) -> Coord {
        let (dx, dy) = direction.delta();
        Coord {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        Direction::iter().map(move |d| self.neighbour(*d))
    }
}
