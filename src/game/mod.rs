//! # Game Module
//!
//! The data model every generation stage operates on.
//!
//! This module contains the building blocks of a generated level:
//! - Grid coordinates and movement directions
//! - The [`Cell`] sum type and the display capabilities it exposes
//! - Item and monster value types
//! - The fixed-size [`Grid`] arena, the finished [`Level`], and the [`Dungeon`] cache

pub mod cell;
pub mod grid;
pub mod items;
pub mod level;
pub mod monster;
pub mod state;

pub use cell::*;
pub use grid::*;
pub use items::*;
pub use level::*;
pub use monster::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on a level grid.
///
/// # Examples
///
/// ```
/// use burrow::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let west = pos.offset(burrow::Direction::West, 2);
/// assert_eq!(west, Position::new(8, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Moves `steps` cells in the given direction.
    pub fn offset(self, direction: Direction, steps: i32) -> Position {
        let delta = direction.to_delta();
        Position::new(self.x + delta.x * steps, self.y + delta.y * steps)
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self.offset(direction, 1))
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions for movement, runs and carving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// North points towards row 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
            Direction::Northeast => Position::new(1, -1),
            Direction::Northwest => Position::new(-1, -1),
            Direction::Southeast => Position::new(1, 1),
            Direction::Southwest => Position::new(-1, 1),
        }
    }

    /// Returns all 8 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ]
    }

    /// The 4 cardinal directions, in N, W, E, S order.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::West,
            Direction::East,
            Direction::South,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.offset(Direction::West, 2), Position::new(3, 5));
        assert_eq!(pos.offset(Direction::South, 2), Position::new(5, 7));
        assert_eq!(pos.offset(Direction::Northeast, 1), Position::new(6, 4));
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(adjacent.len(), 4);
        assert!(adjacent.contains(&Position::new(5, 4))); // North
        assert!(adjacent.contains(&Position::new(4, 5))); // West
        assert!(!adjacent.contains(&Position::new(4, 4))); // No diagonal
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_cardinal_neighbors_follow_direction_order() {
        let pos = Position::new(5, 5);
        assert_eq!(
            pos.cardinal_adjacent_positions(),
            vec![
                Position::new(5, 4),
                Position::new(4, 5),
                Position::new(6, 5),
                Position::new(5, 6),
            ]
        );
        let all = Direction::all();
        assert_eq!(all.len(), 8);
        assert!(Direction::cardinal().iter().all(|d| all.contains(d)));
    }
}
