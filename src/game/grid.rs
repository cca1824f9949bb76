//! # Grid
//!
//! Fixed-size arena of [`Cell`] slots addressed by [`Position`].

use crate::{BurrowError, BurrowResult, Cell, CellDisplay, MonsterRegistry, Position};
use pathfinding::prelude::bfs_reach;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One level's worth of cells, stored row-major.
///
/// The extent is fixed at construction; nothing resizes a grid afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every slot set to `fill`.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Cell, Grid, Position};
    ///
    /// let grid = Grid::filled(10, 5, Cell::wall(false));
    /// assert_eq!(grid.width(), 10);
    /// assert!(grid.get(Position::new(9, 4)).unwrap().is_wall());
    /// assert!(grid.get(Position::new(10, 4)).is_none());
    /// ```
    pub fn filled(width: u32, height: u32, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks that a position lies on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Checks that a position lies inside the one-cell border.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as u32) < self.width.saturating_sub(1)
            && (pos.y as u32) < self.height.saturating_sub(1)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// Writes a cell and returns the one it replaced.
    pub fn set(&mut self, pos: Position, cell: Cell) -> BurrowResult<Cell> {
        let slot = self.get_mut(pos).ok_or(BurrowError::InvalidPosition(pos))?;
        Ok(std::mem::replace(slot, cell))
    }

    /// Returns true if the position holds a wall. Off-grid positions are not walls.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos).map(Cell::is_wall).unwrap_or(false)
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).map(Cell::is_empty).unwrap_or(false)
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Iterates all cells with their positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.positions().zip(self.cells.iter())
    }

    /// Counts cells matching a predicate.
    pub fn count<F: Fn(&Cell) -> bool>(&self, predicate: F) -> usize {
        self.cells.iter().filter(|cell| predicate(*cell)).count()
    }

    /// Finds the positions of cells matching a predicate.
    pub fn find<F: Fn(&Cell) -> bool>(&self, predicate: F) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| predicate(*cell))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Whether any Empty cell lies inside the border.
    pub fn has_interior_empty(&self) -> bool {
        self.iter()
            .any(|(pos, cell)| cell.is_empty() && self.is_interior(pos))
    }

    /// Every non-wall position reachable from `start` through orthogonal steps.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if self.is_wall(start) || !self.in_bounds(start) {
            return HashSet::new();
        }
        bfs_reach(start, |pos| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(|next| self.in_bounds(*next) && !self.is_wall(*next))
                .collect::<Vec<_>>()
        })
        .collect()
    }

    /// Renders the grid as text, one line per row.
    pub fn render(&self, monsters: &MonsterRegistry) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            for cell in row {
                out.push(cell.display(monsters).glyph);
            }
            out.push('\n');
        }
        out
    }

    /// Resolved display for a single position.
    pub fn display_at(&self, pos: Position, monsters: &MonsterRegistry) -> Option<CellDisplay> {
        self.get(pos).map(|cell| cell.display(monsters))
    }
}
