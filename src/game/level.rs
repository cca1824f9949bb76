//! # Level
//!
//! A finished level: the grid, the monsters living on it, and the operations
//! that keep the two consistent while monsters move or die.

use crate::generation::{spawn_monsters, LevelCategory, Placer, TreasureRoom};
use crate::{
    BurrowError, BurrowResult, Cell, CellDisplay, Grid, Item, Monster, MonsterId,
    MonsterRegistry, Position, StairDirection,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A generated level.
///
/// The grid stores [`MonsterId`] handles; the registry owns the monsters. Every
/// mutation that involves a monster goes through this type so both stay in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level number (0 is home)
    pub number: u32,
    pub category: LevelCategory,
    /// Seed the level was generated from
    pub seed: u64,
    /// Whether objects were placed pre-revealed
    pub reveal: bool,
    pub grid: Grid,
    pub monsters: MonsterRegistry,
    /// Monsters in the order they were spawned
    pub spawned: Vec<MonsterId>,
    pub treasure_rooms: Vec<TreasureRoom>,
}

impl Level {
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.grid.get(pos)
    }

    /// Glyph and colors for a position, with monsters resolved.
    pub fn cell_display(&self, pos: Position) -> Option<CellDisplay> {
        self.grid.display_at(pos, &self.monsters)
    }

    /// The monster standing on a position, if any.
    pub fn monster_at(&self, pos: Position) -> Option<&Monster> {
        self.grid
            .get(pos)
            .and_then(Cell::monster_id)
            .and_then(|id| self.monsters.get(id))
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(id)
    }

    /// Moves a monster, restoring what it stood on and displacing the target.
    pub fn move_monster(&mut self, id: MonsterId, to: Position) -> BurrowResult<()> {
        let target = self.grid.get(to).ok_or(BurrowError::InvalidPosition(to))?;
        if !target.is_passable() {
            return Err(BurrowError::InvalidPosition(to));
        }

        let monster = self
            .monsters
            .get_mut(id)
            .ok_or(BurrowError::UnknownMonster(id))?;
        let from = monster.position;
        let restored = std::mem::replace(&mut monster.displaced, Cell::empty());
        self.grid.set(from, restored)?;
        monster.displaced = self.grid.set(to, Cell::Monster(id))?;
        monster.position = to;

        log::trace!("Moved monster {:?} from {:?} to {:?}", id, from, to);
        Ok(())
    }

    /// Removes a monster from the level and puts back what it displaced.
    pub fn remove_monster(&mut self, id: MonsterId) -> BurrowResult<Monster> {
        let monster = self.monsters.remove(id)?;
        self.grid.set(monster.position, monster.displaced.clone())?;
        self.spawned.retain(|spawned| *spawned != id);
        Ok(monster)
    }

    /// Adds the non-fresh share of monsters for this level.
    ///
    /// On failure the level is left exactly as it was.
    pub fn top_up_monsters(&mut self, rng: &mut StdRng) -> BurrowResult<Vec<MonsterId>> {
        let mut placer = Placer::new(&mut self.grid, rng, self.reveal);
        let added = spawn_monsters(self.number, &mut placer, &mut self.monsters, false)?;
        self.spawned.extend(added.iter().copied());
        Ok(added)
    }

    /// Items lying on the level.
    pub fn items(&self) -> impl Iterator<Item = (Position, &Item)> {
        self.grid.iter().filter_map(|(pos, cell)| match cell {
            Cell::Item(item) => Some((pos, item)),
            _ => None,
        })
    }

    /// Position of the first staircase going `direction`.
    pub fn stairs(&self, direction: StairDirection) -> Option<Position> {
        self.grid.iter().find_map(|(pos, cell)| match cell {
            Cell::Stairs(stairs) if stairs.direction == direction => Some(pos),
            _ => None,
        })
    }

    /// Non-wall positions reachable from `start` by orthogonal steps.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        self.grid.reachable_from(start)
    }

    /// Text rendering of the level, one line per row.
    pub fn render(&self) -> String {
        self.grid.render(&self.monsters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationConfig, Generator, ItemKind, LevelGenerator};
    use rand::SeedableRng;

    fn level(number: u32, seed: u64) -> Level {
        let config = GenerationConfig::for_testing(seed);
        LevelGenerator::new(number)
            .generate(&config, &mut StdRng::seed_from_u64(seed))
            .unwrap()
    }

    #[test]
    fn test_monster_handles_match_grid() {
        let level = level(3, 11);
        assert!(!level.spawned.is_empty());
        for id in &level.spawned {
            let monster = level.monster(*id).unwrap();
            assert_eq!(level.cell(monster.position), Some(&Cell::Monster(*id)));
            assert_eq!(level.monster_at(monster.position).map(|m| m.id), Some(*id));
        }
    }

    #[test]
    fn test_move_monster_restores_displaced_cell() {
        let mut level = level(2, 5);
        let id = level.spawned[0];
        let from = level.monster(id).unwrap().position;
        let before = level.monster(id).unwrap().displaced.clone();

        let to = from
            .cardinal_adjacent_positions()
            .into_iter()
            .chain(level.grid.find(Cell::is_empty))
            .find(|pos| level.cell(*pos).map(Cell::is_passable).unwrap_or(false))
            .unwrap();
        let target_before = level.cell(to).cloned().unwrap();

        level.move_monster(id, to).unwrap();

        assert_eq!(level.cell(from), Some(&before));
        assert_eq!(level.cell(to), Some(&Cell::Monster(id)));
        let monster = level.monster(id).unwrap();
        assert_eq!(monster.position, to);
        assert_eq!(monster.displaced, target_before);
    }

    #[test]
    fn test_move_monster_into_wall_is_rejected() {
        let mut level = level(2, 8);
        let id = level.spawned[0];
        let wall = level.grid.find(Cell::is_wall)[0];
        assert!(level.move_monster(id, wall).is_err());
        assert!(level.move_monster(id, Position::new(-3, 0)).is_err());
    }

    #[test]
    fn test_remove_monster_restores_map() {
        let mut level = level(4, 21);
        let id = level.spawned[0];
        let monster = level.monster(id).cloned().unwrap();

        let removed = level.remove_monster(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(level.cell(monster.position), Some(&monster.displaced));
        assert!(!level.spawned.contains(&id));
        assert!(level.remove_monster(id).is_err());
    }

    #[test]
    fn test_top_up_adds_base_count() {
        let mut level = level(6, 3);
        let before = level.monsters.len();
        let mut rng = StdRng::seed_from_u64(77);
        let added = level.top_up_monsters(&mut rng).unwrap();
        assert_eq!(added.len(), 4);
        assert_eq!(level.monsters.len(), before + 4);
    }

    #[test]
    fn test_failed_top_up_leaves_level_unchanged() {
        let mut level = level(6, 3);
        // Leave two empty cells; level 6 tops up with four monsters
        for pos in level.grid.find(Cell::is_empty).into_iter().skip(2) {
            level.grid.set(pos, Cell::wall(true)).unwrap();
        }
        let before = level.clone();

        let mut rng = StdRng::seed_from_u64(77);
        assert!(matches!(
            level.top_up_monsters(&mut rng),
            Err(BurrowError::NoOpenCell)
        ));
        assert_eq!(level.grid, before.grid);
        assert_eq!(level.spawned, before.spawned);
        assert_eq!(level.monsters.len(), before.monsters.len());
        assert_eq!(
            level.grid.count(|cell| cell.monster_id().is_some()),
            level.monsters.len()
        );
        assert_eq!(level.spawned.len(), level.monsters.len());
    }

    #[test]
    fn test_reachable_from_stairs_includes_stairs() {
        let level = level(5, 2);
        let down = level.stairs(StairDirection::Down).unwrap();
        let reached = level.reachable_from(down);
        assert!(reached.contains(&down));
        assert!(reached.iter().all(|pos| !level.grid.is_wall(*pos)));
    }

    #[test]
    fn test_items_iterator() {
        let level = level(1, 9);
        let chests = level
            .items()
            .filter(|(_, item)| matches!(item.kind, ItemKind::Chest { .. }))
            .count();
        assert_eq!(chests, 1);
    }
}
