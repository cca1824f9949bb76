//! # Maze Carving
//!
//! Turns a grid of solid walls into passages.
//!
//! Two carvers are provided:
//!
//! - [`EatingCarver`], the default: a walk that "eats" two cells at a time from
//!   (1,1), producing sparse, tree-like corridors. Pockets of rock that the walk
//!   never reaches stay sealed; full connectivity is not a goal of this carver.
//! - [`FrontierCarver`]: randomized frontier growth from one random wall. Every
//!   opened cell touches an earlier one, so the result is fully connected.

use crate::{BurrowError, BurrowResult, Cell, Direction, GenerationConfig, Generator, Grid, Position};
use rand::rngs::StdRng;
use rand::Rng;

/// Carving directions in the order a frame cycles through them.
const CARVE_ORDER: [Direction; 4] = [
    Direction::West,
    Direction::East,
    Direction::North,
    Direction::South,
];

/// Full cycles through [`CARVE_ORDER`] before a frame gives up.
const CARVE_CYCLES: u8 = 2;

/// One suspended step of the eating walk.
#[derive(Debug, Clone, Copy)]
struct Frame {
    pos: Position,
    /// Index into [`CARVE_ORDER`] of the next direction to try
    cursor: usize,
    /// Full cycles left before this frame is done
    cycles: u8,
}

impl Frame {
    fn new(pos: Position, rng: &mut StdRng) -> Self {
        Self {
            pos,
            cursor: rng.gen_range(0..CARVE_ORDER.len()),
            cycles: CARVE_CYCLES,
        }
    }
}

/// The classic two-step eating walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EatingCarver {
    pub start: Position,
}

impl EatingCarver {
    pub fn new() -> Self {
        Self {
            start: Position::new(1, 1),
        }
    }

    /// Carves passages into `grid`, which should be solid wall.
    ///
    /// Each frame tries the four directions cyclically, starting at a random one.
    /// A step opens the next two cells when both are wall and the landing cell
    /// stays inside the border; the walk then continues from the landing cell and
    /// the current frame resumes its cycle once that branch is exhausted. A frame
    /// ends after two full cycles.
    pub fn carve(&self, grid: &mut Grid, rng: &mut StdRng) {
        if !grid.is_interior(self.start) {
            return;
        }
        // The walk opens its own starting cell
        if let Some(cell) = grid.get_mut(self.start) {
            *cell = Cell::empty();
        }

        let mut stack = vec![Frame::new(self.start, rng)];
        let mut frames = 1usize;
        let mut deepest = 1usize;

        while let Some(frame) = stack.last_mut() {
            if frame.cycles == 0 {
                stack.pop();
                continue;
            }

            let direction = CARVE_ORDER[frame.cursor];
            let pos = frame.pos;
            frame.cursor += 1;
            if frame.cursor == CARVE_ORDER.len() {
                frame.cursor = 0;
                frame.cycles -= 1;
            }

            if let Some(landing) = eat(grid, pos, direction) {
                stack.push(Frame::new(landing, rng));
                frames += 1;
                deepest = deepest.max(stack.len());
            }
        }

        log::debug!(
            "Eating walk finished: {} frames, max depth {}, {} open cells",
            frames,
            deepest,
            grid.count(Cell::is_empty)
        );
    }
}

impl Default for EatingCarver {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens two cells from `pos` towards `direction` if both are wall and the
/// landing cell stays inside the border. Returns the landing cell.
fn eat(grid: &mut Grid, pos: Position, direction: Direction) -> Option<Position> {
    let near = pos.offset(direction, 1);
    let landing = pos.offset(direction, 2);
    if !grid.is_interior(landing) || !grid.is_wall(near) || !grid.is_wall(landing) {
        return None;
    }
    for target in [near, landing] {
        if let Some(cell) = grid.get_mut(target) {
            *cell = Cell::empty();
        }
    }
    Some(landing)
}

/// Randomized frontier growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierCarver;

impl FrontierCarver {
    pub fn new() -> Self {
        Self
    }

    /// Opens walls picked at random from a growing frontier.
    ///
    /// A frontier wall is opened only while it has at most one open orthogonal
    /// neighbor inside the border; its wall neighbors then join the frontier.
    pub fn carve(&self, grid: &mut Grid, rng: &mut StdRng) {
        if grid.width() < 3 || grid.height() < 3 {
            return;
        }
        let seed = Position::new(
            rng.gen_range(1..grid.width() as i32 - 1),
            rng.gen_range(1..grid.height() as i32 - 1),
        );
        let mut frontier = vec![seed];
        let mut opened = 0usize;

        while !frontier.is_empty() {
            let pos = frontier.swap_remove(rng.gen_range(0..frontier.len()));
            if !grid.is_wall(pos) || open_neighbors(grid, pos) > 1 {
                continue;
            }
            if let Some(cell) = grid.get_mut(pos) {
                *cell = Cell::empty();
                opened += 1;
            }
            frontier.extend(
                interior_neighbors(grid, pos)
                    .into_iter()
                    .filter(|next| grid.is_wall(*next)),
            );
        }

        log::debug!("Frontier carving opened {} cells", opened);
    }
}

fn interior_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
    pos.cardinal_adjacent_positions()
        .into_iter()
        .filter(|next| grid.is_interior(*next))
        .collect()
}

fn open_neighbors(grid: &Grid, pos: Position) -> usize {
    interior_neighbors(grid, pos)
        .into_iter()
        .filter(|next| grid.is_empty_at(*next))
        .count()
}

/// Builds a wall grid of the configured extent and carves it.
fn carved_grid(config: &GenerationConfig, carve: impl FnOnce(&mut Grid)) -> BurrowResult<Grid> {
    config.validate()?;
    let mut grid = Grid::filled(config.width, config.height, Cell::wall(config.reveal));
    carve(&mut grid);
    Ok(grid)
}

/// Checks the border stayed intact and something was opened.
fn validate_carving(grid: &Grid) -> BurrowResult<()> {
    let breach = grid
        .iter()
        .find(|(pos, cell)| !cell.is_wall() && !grid.is_interior(*pos));
    if let Some((pos, _)) = breach {
        return Err(BurrowError::GenerationFailed(format!(
            "carving opened border cell {:?}",
            pos
        )));
    }
    if grid.count(Cell::is_empty) == 0 {
        return Err(BurrowError::GenerationFailed(
            "carving opened no cells".to_string(),
        ));
    }
    Ok(())
}

impl Generator<Grid> for EatingCarver {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<Grid> {
        carved_grid(config, |grid| self.carve(grid, rng))
    }

    fn validate(&self, grid: &Grid, _config: &GenerationConfig) -> BurrowResult<()> {
        validate_carving(grid)
    }

    fn generator_type(&self) -> &'static str {
        "EatingCarver"
    }
}

impl Generator<Grid> for FrontierCarver {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<Grid> {
        carved_grid(config, |grid| self.carve(grid, rng))
    }

    fn validate(&self, grid: &Grid, _config: &GenerationConfig) -> BurrowResult<()> {
        validate_carving(grid)?;
        let open = grid.find(Cell::is_empty);
        let reached = grid.reachable_from(open[0]);
        if reached.len() != open.len() {
            return Err(BurrowError::GenerationFailed(format!(
                "frontier carving left {} of {} cells unreachable",
                open.len() - reached.len(),
                open.len()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "FrontierCarver"
    }
}
