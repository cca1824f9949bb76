//! # Treasure Rooms
//!
//! Walled rectangular rooms with a single closed door, stamped over an already
//! carved level.

use crate::{BurrowError, BurrowResult, Cell, Door, Grid, Position};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Columns between the left edges of consecutive room bands.
pub const ROOM_BAND_SPACING: i32 = 10;

/// One in this many bands gets a room.
pub const ROOM_CHANCE: u32 = 13;

/// Smallest and largest room side, walls included.
pub const ROOM_MIN_SIDE: i32 = 4;
pub const ROOM_MAX_SIDE: i32 = 9;

/// A treasure room stamped onto a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureRoom {
    /// Top-left corner, on the wall
    pub origin: Position,
    /// Width including walls
    pub width: i32,
    /// Height including walls
    pub height: i32,
    pub door: Position,
    pub tag: u8,
}

impl TreasureRoom {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.origin.x
            && pos.y >= self.origin.y
            && pos.x < self.origin.x + self.width
            && pos.y < self.origin.y + self.height
    }

    pub fn is_border(&self, pos: Position) -> bool {
        self.contains(pos)
            && (pos.x == self.origin.x
                || pos.y == self.origin.y
                || pos.x == self.origin.x + self.width - 1
                || pos.y == self.origin.y + self.height - 1)
    }

    /// Perimeter cells in row-major order, each listed once.
    pub fn perimeter(&self) -> Vec<Position> {
        perimeter(self.origin, self.width, self.height)
    }

    /// Cells inside the walls.
    pub fn interior(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for y in (self.origin.y + 1)..(self.origin.y + self.height - 1) {
            for x in (self.origin.x + 1)..(self.origin.x + self.width - 1) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }
}

/// Row-major list of the border cells of a `width` x `height` rectangle.
///
/// Corners appear once, so the list has `2 * width + 2 * height - 4` entries.
pub fn perimeter(origin: Position, width: i32, height: i32) -> Vec<Position> {
    let mut cells = Vec::with_capacity((2 * width + 2 * height - 4).max(0) as usize);
    for y in origin.y..origin.y + height {
        let on_edge_row = y == origin.y || y == origin.y + height - 1;
        for x in origin.x..origin.x + width {
            if on_edge_row || x == origin.x || x == origin.x + width - 1 {
                cells.push(Position::new(x, y));
            }
        }
    }
    cells
}

/// Stamps a room onto the grid: walls, an open interior, and one closed door.
///
/// The door replaces a perimeter cell chosen uniformly from [`perimeter`].
pub fn build_treasure_room(
    width: i32,
    height: i32,
    origin: Position,
    tag: u8,
    grid: &mut Grid,
    rng: &mut StdRng,
    reveal: bool,
) -> BurrowResult<TreasureRoom> {
    if width < 3 || height < 3 {
        return Err(BurrowError::GenerationFailed(format!(
            "treasure room {}x{} has no interior",
            width, height
        )));
    }
    let far_corner = Position::new(origin.x + width - 1, origin.y + height - 1);
    for corner in [origin, far_corner] {
        if !grid.in_bounds(corner) {
            return Err(BurrowError::InvalidPosition(corner));
        }
    }

    log::debug!(
        "Building treasure room at {:?}, {}x{}, tag {}",
        origin,
        width,
        height,
        tag
    );

    let mut room = TreasureRoom {
        origin,
        width,
        height,
        door: origin,
        tag,
    };

    for pos in room.perimeter() {
        grid.set(pos, Cell::wall(reveal))?;
    }
    for pos in room.interior() {
        grid.set(pos, Cell::empty())?;
    }

    let border = room.perimeter();
    room.door = border[rng.gen_range(0..border.len())];
    grid.set(room.door, Cell::Door(Door::closed(tag, reveal)))?;

    Ok(room)
}

/// Rolls for a treasure room in each vertical band of the level.
///
/// Bands start at a random column in `[2, 12)` and repeat every
/// [`ROOM_BAND_SPACING`] columns; each gets a room with probability
/// `1 / ROOM_CHANCE`.
pub fn place_treasure_rooms(
    grid: &mut Grid,
    rng: &mut StdRng,
    reveal: bool,
) -> BurrowResult<Vec<TreasureRoom>> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut rooms = Vec::new();

    let mut x = 2 + rng.gen_range(0..ROOM_BAND_SPACING);
    while x < width - ROOM_BAND_SPACING {
        if rng.gen_range(0..ROOM_CHANCE) == 0 {
            let room_width = rng.gen_range(ROOM_MIN_SIDE..=ROOM_MAX_SIDE);
            let room_height = rng.gen_range(ROOM_MIN_SIDE..=ROOM_MAX_SIDE);
            // Keep the bottom wall off the level border
            let y = (rng.gen_range(0..height - 10) + 2).min(height - 1 - room_height);
            let tag = rng.gen_range(1..=9);
            rooms.push(build_treasure_room(
                room_width,
                room_height,
                Position::new(x, y),
                tag,
                grid,
                rng,
                reveal,
            )?);
        }
        x += ROOM_BAND_SPACING;
    }

    if !rooms.is_empty() {
        log::info!("Placed {} treasure room(s)", rooms.len());
    }
    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_perimeter_has_unique_cells() {
        let cells = perimeter(Position::new(3, 2), 5, 4);
        assert_eq!(cells.len(), 2 * 5 + 2 * 4 - 4);
        let unique: std::collections::HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), cells.len());
        assert_eq!(cells[0], Position::new(3, 2));
        assert_eq!(cells[cells.len() - 1], Position::new(7, 5));
    }

    #[test]
    fn test_room_has_single_door_and_open_interior() {
        let mut grid = Grid::filled(30, 15, Cell::wall(false));
        let mut rng = StdRng::seed_from_u64(4);
        let room = build_treasure_room(6, 5, Position::new(4, 3), 7, &mut grid, &mut rng, false).unwrap();

        let doors: Vec<_> = room
            .perimeter()
            .into_iter()
            .filter(|pos| matches!(grid.get(*pos), Some(Cell::Door(_))))
            .collect();
        assert_eq!(doors, vec![room.door]);
        assert!(room.is_border(room.door));
        assert_eq!(grid.get(room.door), Some(&Cell::Door(Door::closed(7, false))));

        assert_eq!(room.interior().len(), 4 * 3);
        assert!(room.interior().iter().all(|pos| grid.is_empty_at(*pos)));
    }

    #[test]
    fn test_room_overwrites_carved_cells() {
        let mut grid = Grid::filled(20, 12, Cell::empty());
        let mut rng = StdRng::seed_from_u64(1);
        let room = build_treasure_room(4, 4, Position::new(2, 2), 1, &mut grid, &mut rng, true).unwrap();
        let walls = room
            .perimeter()
            .into_iter()
            .filter(|pos| grid.is_wall(*pos))
            .count();
        assert_eq!(walls, 11);
    }

    #[test]
    fn test_room_out_of_bounds_is_rejected() {
        let mut grid = Grid::filled(20, 12, Cell::wall(false));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(build_treasure_room(9, 9, Position::new(15, 5), 1, &mut grid, &mut rng, false).is_err());
        assert!(build_treasure_room(2, 9, Position::new(1, 1), 1, &mut grid, &mut rng, false).is_err());
    }

    #[test]
    fn test_placed_rooms_stay_inside_border() {
        let mut total = 0;
        for seed in 0..200 {
            let mut grid = Grid::filled(67, 17, Cell::wall(false));
            let mut rng = StdRng::seed_from_u64(seed);
            let rooms = place_treasure_rooms(&mut grid, &mut rng, false).unwrap();
            for room in &rooms {
                assert!((ROOM_MIN_SIDE..=ROOM_MAX_SIDE).contains(&room.width));
                assert!((ROOM_MIN_SIDE..=ROOM_MAX_SIDE).contains(&room.height));
                assert!(room.perimeter().iter().all(|pos| grid.is_interior(*pos)));
            }
            for pair in rooms.windows(2) {
                assert!(pair[0].origin.x + pair[0].width <= pair[1].origin.x);
            }
            total += rooms.len();
        }
        // Roughly one band in thirteen; 200 levels of five or six bands
        assert!(total > 20 && total < 200, "placed {} rooms", total);
    }
}
