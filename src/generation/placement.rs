//! # Object Placement
//!
//! Drops objects onto open floor. A placement starts from a seed position and
//! random-walks until it stands on an [`Cell::Empty`] cell inside the border.

use crate::{config, BurrowError, BurrowResult, Cell, Grid, Position};
use rand::rngs::StdRng;
use rand::Rng;

/// Places objects on a grid, drawing every random choice from one generator.
pub struct Placer<'a> {
    grid: &'a mut Grid,
    rng: &'a mut StdRng,
    reveal: bool,
}

impl<'a> Placer<'a> {
    pub fn new(grid: &'a mut Grid, rng: &'a mut StdRng, reveal: bool) -> Self {
        Self { grid, rng, reveal }
    }

    /// Whether placed objects start visible.
    pub fn reveal(&self) -> bool {
        self.reveal
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut *self.grid
    }

    /// The generator shared by every placement.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    /// A uniformly random position inside the border.
    pub fn random_seed(&mut self) -> Position {
        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        Position::new(self.rng.gen_range(1..width - 1), self.rng.gen_range(1..height - 1))
    }

    /// Walks from `seed` until the cell underfoot is empty.
    ///
    /// Each step moves both axes by -1, 0 or +1 and wraps around inside the
    /// border. Fails up front when no interior cell is empty, so the walk
    /// always has somewhere to end.
    pub fn find_open_cell(&mut self, seed: Position) -> BurrowResult<Position> {
        if !self.grid.has_interior_empty() {
            return Err(BurrowError::NoOpenCell);
        }
        let span_x = self.grid.width() as i32 - 2;
        let span_y = self.grid.height() as i32 - 2;

        let mut pos = Position::new(wrap(seed.x, span_x), wrap(seed.y, span_y));
        let mut steps = 0u64;
        while !self.grid.is_empty_at(pos) {
            pos.x = wrap(pos.x + self.rng.gen_range(-1..=1), span_x);
            pos.y = wrap(pos.y + self.rng.gen_range(-1..=1), span_y);
            steps += 1;
        }
        log::trace!("Open cell {:?} found after {} steps from {:?}", pos, steps, seed);
        Ok(pos)
    }

    /// Places `cell` on the nearest open cell found from `seed`.
    ///
    /// Visibility is set from the reveal flag when the cell supports it.
    /// Returns where the cell landed and what it replaced.
    pub fn place(&mut self, seed: Position, mut cell: Cell) -> BurrowResult<(Position, Cell)> {
        let pos = self.find_open_cell(seed)?;
        cell.set_visible(self.reveal);
        let displaced = self.grid.set(pos, cell)?;
        Ok((pos, displaced))
    }

    /// Places `cell` starting from a random seed.
    pub fn place_random(&mut self, cell: Cell) -> BurrowResult<(Position, Cell)> {
        let seed = self.random_seed();
        self.place(seed, cell)
    }

    /// Places `count` cells, building each with `factory`.
    pub fn place_many<F>(&mut self, count: u32, mut factory: F) -> BurrowResult<Vec<Position>>
    where
        F: FnMut(&mut StdRng) -> Cell,
    {
        let mut placed = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let cell = factory(&mut *self.rng);
            let (pos, _) = self.place_random(cell)?;
            placed.push(pos);
        }
        Ok(placed)
    }

    /// Places `cell` with probability `numerator / 151`.
    pub fn place_rare(
        &mut self,
        numerator: u32,
        cell: Cell,
    ) -> BurrowResult<Option<(Position, Cell)>> {
        let roll = self.rng.gen_range(0..config::RARE_MODULUS);
        if roll >= numerator {
            return Ok(None);
        }
        log::debug!("Rare placement succeeded ({} < {})", roll, numerator);
        self.place_random(cell).map(Some)
    }
}

/// Wraps a coordinate into `[1, span]`.
fn wrap(value: i32, span: i32) -> i32 {
    (value - 1).rem_euclid(span) + 1
}
