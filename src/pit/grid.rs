use serde::Serialize;

use crate::pit::types::Coord;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width:  i64,
    pub height: i64,
}

impl Grid {
    #[must_use]
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width
            && coord.y < self.height
    }

    /// Cells that are not on the outermost ring. `None` if the count does
    /// not fit in an `i64`.
    #[must_use]
    pub const fn interior_area(&self) -> Option<i64> {
        if self.width < 3 || self.height < 3 {
            Some(0)
        } else {
            (self.width - 2).checked_mul(self.height - 2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let grid = Grid::new(30, 20);
        assert!(grid.contains(Coord::new(0, 0)));
        assert!(grid.contains(Coord::new(29, 19)));
        assert!(!grid.contains(Coord::new(30, 19)));
        assert!(!grid.contains(Coord::new(29, 20)));
        assert!(!grid.contains(Coord::new(-1, 5)));
        assert!(!grid.contains(Coord::new(5, -1)));
    }

    #[test]
    fn interior_excludes_the_ring() {
        assert_eq!(Grid::new(30, 30).interior_area(), Some(28 * 28));
        assert_eq!(Grid::new(3, 3).interior_area(), Some(1));
        assert_eq!(Grid::new(2, 10).interior_area(), Some(0));
    }

    #[test]
    fn huge_interior_does_not_overflow() {
        assert_eq!(Grid::new(i64::MAX, i64::MAX).interior_area(), None);
    }
}
