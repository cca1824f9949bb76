//! # Monster Spawning
//!
//! Picks level-appropriate monsters, registers them and drops them on open
//! floor.

use crate::generation::Placer;
use crate::{BurrowError, BurrowResult, Cell, MonsterId, MonsterKind, MonsterRegistry, Visible};
use rand::Rng;

/// Monsters spawned on every call: `level / 2 + 1`.
pub fn base_monster_count(level: u32) -> u32 {
    level / 2 + 1
}

/// How many monsters a spawn on `level` produces.
///
/// A fresh level gets `2 + rand[0, 12)` on top of the base count.
pub fn monster_count<R: Rng + ?Sized>(level: u32, fresh: bool, rng: &mut R) -> u32 {
    let base = base_monster_count(level);
    if fresh {
        base + 2 + rng.gen_range(0..12)
    } else {
        base
    }
}

/// Spawns monsters for `level` and returns their handles in spawn order.
///
/// Each monster is registered, placed on an empty cell, and given its position
/// and the cell it displaced. Monsters start visible only on revealed levels.
///
/// A spawn is all or nothing: if any monster cannot be placed, the monsters
/// already placed by this call are taken off the grid and out of the registry
/// before the error is returned.
pub fn spawn_monsters(
    level: u32,
    placer: &mut Placer,
    registry: &mut MonsterRegistry,
    fresh: bool,
) -> BurrowResult<Vec<MonsterId>> {
    let count = monster_count(level, fresh, placer.rng());
    let mut spawned = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let kind = MonsterKind::for_level(level, placer.rng());
        match spawn_one(kind, placer, registry) {
            Ok(id) => spawned.push(id),
            Err(err) => {
                log::warn!(
                    "Spawn on level {} failed after {} of {} monster(s): {}",
                    level,
                    spawned.len(),
                    count,
                    err
                );
                withdraw(&spawned, placer, registry)?;
                return Err(err);
            }
        }
    }

    log::debug!(
        "Spawned {} monster(s) on level {} (fresh: {})",
        spawned.len(),
        level,
        fresh
    );
    Ok(spawned)
}

/// Finds a cell before registering, so a failed search leaves no orphan.
fn spawn_one(
    kind: MonsterKind,
    placer: &mut Placer,
    registry: &mut MonsterRegistry,
) -> BurrowResult<MonsterId> {
    let seed = placer.random_seed();
    let open = placer.find_open_cell(seed)?;
    let id = registry.register(kind);
    let (position, displaced) = match placer.place(open, Cell::Monster(id)) {
        Ok(placed) => placed,
        Err(err) => {
            registry.remove(id)?;
            return Err(err);
        }
    };

    let monster = registry
        .get_mut(id)
        .ok_or(BurrowError::UnknownMonster(id))?;
    monster.position = position;
    monster.displaced = displaced;
    monster.set_visible(placer.reveal());

    log::trace!("Spawned {} ({:?}) at {:?}", kind.name(), id, position);
    Ok(id)
}

/// Takes spawned monsters back off the grid, newest first.
fn withdraw(
    spawned: &[MonsterId],
    placer: &mut Placer,
    registry: &mut MonsterRegistry,
) -> BurrowResult<()> {
    for id in spawned.iter().rev() {
        let monster = registry.remove(*id)?;
        placer.grid_mut().set(monster.position, monster.displaced)?;
    }
    Ok(())
}
