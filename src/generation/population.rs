//! # Level Population
//!
//! The per-level policy table: stairs and entrances, dungeon features, loot,
//! and the rare equipment drops.
//!
//! Rare drops roll their enchantment before the rarity check, so every drop in
//! a table consumes the same random draws whether it lands or not.

use crate::generation::{LevelCategory, Placer};
use crate::{
    levels, ArmorKind, BurrowResult, Cell, Entrance, EntranceKind, GemStone, Item, ItemKind,
    PotionKind, RingKind, ScrollKind, SpecialKind, Stairs, TrapKind, WeaponKind,
};
use rand::rngs::StdRng;
use rand::Rng;

/// A rare item: its odds out of 151 and how to build it.
struct RareDrop {
    odds: u32,
    make: fn(&mut StdRng) -> Item,
}

impl RareDrop {
    const fn new(odds: u32, make: fn(&mut StdRng) -> Item) -> Self {
        Self { odds, make }
    }
}

/// Armor and weapons that may appear on any dungeon or volcano level.
const EQUIPMENT: [RareDrop; 9] = [
    RareDrop::new(2, |_| Item::armor(ArmorKind::RingMail, 0)),
    RareDrop::new(1, |_| Item::armor(ArmorKind::StuddedLeather, 0)),
    RareDrop::new(3, |_| Item::armor(ArmorKind::SplintMail, 0)),
    RareDrop::new(5, |rng| {
        Item::new(ItemKind::Shield {
            attribute: rng.gen_range(0..3),
        })
    }),
    RareDrop::new(2, |rng| Item::weapon(WeaponKind::BattleAxe, rng.gen_range(0..3))),
    RareDrop::new(5, |rng| Item::weapon(WeaponKind::LongSword, rng.gen_range(0..3))),
    RareDrop::new(5, |rng| Item::weapon(WeaponKind::Flail, rng.gen_range(0..3))),
    RareDrop::new(7, |rng| Item::weapon(WeaponKind::Spear, rng.gen_range(0..5))),
    RareDrop::new(2, |_| Item::weapon(WeaponKind::SwordOfSlashing, 0)),
];

/// Only generated on the first dungeon level.
const FIRST_LEVEL_EQUIPMENT: [RareDrop; 1] =
    [RareDrop::new(4, |_| Item::weapon(WeaponKind::BessmansHammer, 0))];

/// Deeper gear, offered on one level in four past level 3.
const SECOND_TIER: [RareDrop; 5] = [
    RareDrop::new(3, |_| Item::weapon(WeaponKind::SunSword, 3)),
    RareDrop::new(5, |rng| {
        Item::weapon(WeaponKind::TwoHandedSword, rng.gen_range(0..3) + 1)
    }),
    RareDrop::new(3, |_| Item::new(ItemKind::Belt { attribute: 4 })),
    RareDrop::new(3, |_| Item::ring(RingKind::Energy, 3)),
    RareDrop::new(4, |_| Item::armor(ArmorKind::PlateMail, 5)),
];

const RINGS: [RareDrop; 3] = [
    RareDrop::new(4, |rng| Item::ring(RingKind::Regeneration, rng.gen_range(0..3))),
    RareDrop::new(1, |rng| Item::ring(RingKind::Protection, rng.gen_range(0..3))),
    RareDrop::new(2, |_| Item::ring(RingKind::Strength, 4)),
];

const SPECIALS: [RareDrop; 5] = [
    RareDrop::new(3, |_| Item::special(SpecialKind::OrbOfDragonSlaying)),
    RareDrop::new(4, |_| Item::special(SpecialKind::ScarabOfNegateSpirit)),
    RareDrop::new(4, |_| Item::special(SpecialKind::CubeOfUndeadControl)),
    RareDrop::new(3, |_| Item::special(SpecialKind::DeviceOfTheftPrevention)),
    RareDrop::new(3, |_| Item::special(SpecialKind::AmuletOfLifePreservation)),
];

/// Gems and their value scale, in placement order.
const GEMS: [GemStone; 4] = [
    GemStone::Diamond,
    GemStone::Ruby,
    GemStone::Emerald,
    GemStone::Sapphire,
];

/// Furnishes a freshly carved level according to its number and category.
///
/// Fails with a category mismatch when `category` is not the category of
/// `level`.
pub fn populate(level: u32, category: LevelCategory, placer: &mut Placer) -> BurrowResult<()> {
    category.check(level)?;

    if category == LevelCategory::Home {
        for kind in EntranceKind::ALL {
            placer.place_random(Cell::Entrance(Entrance::new(kind)))?;
        }
        log::debug!("Placed {} entrances on the home level", EntranceKind::ALL.len());
        return Ok(());
    }

    place_stairs(level, placer)?;
    place_features(level, placer)?;
    place_loot(level, placer)?;
    place_rare_items(level, placer)?;
    Ok(())
}

fn place_stairs(level: u32, placer: &mut Placer) -> BurrowResult<()> {
    if level != levels::FIRST_DUNGEON {
        placer.place_random(Cell::Stairs(Stairs::up(level)))?;
    }
    if !levels::is_terminal(level) {
        placer.place_random(Cell::Stairs(Stairs::down(level)))?;
    }
    Ok(())
}

/// Books, altars, statues, pits, fountains, traps and chests.
fn place_features(level: u32, placer: &mut Placer) -> BurrowResult<()> {
    let fixtures = [
        ItemKind::Book { level },
        ItemKind::Altar,
        ItemKind::Statue,
        ItemKind::Pit,
        ItemKind::Fountain,
        ItemKind::Trap(TrapKind::Arrow),
    ];
    for kind in fixtures {
        let count = placer.rng().gen_range(0..3);
        placer.place_many(count, |_| Cell::Item(Item::new(kind)))?;
    }

    for trap in [TrapKind::Teleport, TrapKind::Dart] {
        let count = placer.rng().gen_range(0..3u32).saturating_sub(1);
        placer.place_many(count, |_| Cell::Item(Item::trap(trap)))?;
    }

    let chest = Cell::Item(Item::new(ItemKind::Chest { level }));
    if level == levels::FIRST_DUNGEON {
        placer.place_random(chest)?;
    } else {
        let count = placer.rng().gen_range(0..2);
        placer.place_many(count, |_| chest.clone())?;
    }

    if !levels::is_terminal(level) {
        let count = placer.rng().gen_range(0..2);
        placer.place_many(count, |_| Cell::Item(Item::trap(TrapKind::TrapDoor)))?;
    }
    Ok(())
}

/// Gems, potions, scrolls and gold.
fn place_loot(level: u32, placer: &mut Placer) -> BurrowResult<()> {
    if level <= levels::MAX_DUNGEON {
        for stone in GEMS {
            let count = placer.rng().gen_range(0..2);
            placer.place_many(count, |rng| {
                Cell::Item(Item::new(ItemKind::Gem {
                    stone,
                    value: stone.roll_value(level, rng),
                }))
            })?;
        }
    }

    let potions = 4 + placer.rng().gen_range(0..4);
    placer.place_many(potions, |rng| {
        Cell::Item(Item::new(ItemKind::Potion(PotionKind::random(rng))))
    })?;

    let scrolls = 4 + placer.rng().gen_range(0..5);
    placer.place_many(scrolls, |rng| {
        Cell::Item(Item::new(ItemKind::Scroll(ScrollKind::random(rng))))
    })?;

    let piles = 12 + placer.rng().gen_range(0..12);
    placer.place_many(piles, |rng| {
        Cell::Item(Item::new(ItemKind::GoldPile {
            amount: gold_amount(level, rng),
        }))
    })?;

    log::debug!(
        "Level {}: {} potions, {} scrolls, {} gold piles",
        level,
        potions,
        scrolls,
        piles
    );
    Ok(())
}

/// Gold in one pile: `12 * rand[0, level] + 8 * level + 10`.
pub fn gold_amount<R: Rng + ?Sized>(level: u32, rng: &mut R) -> u32 {
    12 * rng.gen_range(0..=level) + 8 * level + 10
}

fn place_rare_items(level: u32, placer: &mut Placer) -> BurrowResult<()> {
    let mut placed = roll_drops(&EQUIPMENT, placer)?;
    if level == levels::FIRST_DUNGEON {
        placed += roll_drops(&FIRST_LEVEL_EQUIPMENT, placer)?;
    }
    if placer.rng().gen_range(0..4) == 3 && level > 3 {
        placed += roll_drops(&SECOND_TIER, placer)?;
    }
    placed += roll_drops(&RINGS, placer)?;
    placed += roll_drops(&SPECIALS, placer)?;

    if placed > 0 {
        log::debug!("Level {}: {} rare item(s) placed", level, placed);
    }
    Ok(())
}

fn roll_drops(drops: &[RareDrop], placer: &mut Placer) -> BurrowResult<usize> {
    let mut placed = 0;
    for drop in drops {
        let item = (drop.make)(placer.rng());
        if placer.place_rare(drop.odds, Cell::Item(item))?.is_some() {
            placed += 1;
        }
    }
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BurrowError, Grid, StairDirection};
    use rand::SeedableRng;

    fn floor_grid() -> Grid {
        let mut grid = Grid::filled(67, 17, Cell::wall(true));
        for pos in grid.positions().collect::<Vec<_>>() {
            if grid.is_interior(pos) {
                grid.set(pos, Cell::empty()).unwrap();
            }
        }
        grid
    }

    fn populated(level: u32, seed: u64) -> Grid {
        let mut grid = floor_grid();
        let mut rng = StdRng::seed_from_u64(seed);
        let category = LevelCategory::for_level(level).unwrap();
        let mut placer = Placer::new(&mut grid, &mut rng, true);
        populate(level, category, &mut placer).unwrap();
        grid
    }

    fn count_items(grid: &Grid, predicate: impl Fn(&ItemKind) -> bool) -> usize {
        grid.count(|cell| matches!(cell, Cell::Item(item) if predicate(&item.kind)))
    }

    fn count_stairs(grid: &Grid, direction: StairDirection) -> usize {
        grid.count(|cell| matches!(cell, Cell::Stairs(stairs) if stairs.direction == direction))
    }

    #[test]
    fn test_home_gets_every_entrance_once() {
        let grid = populated(0, 1);
        for kind in EntranceKind::ALL {
            assert_eq!(
                grid.count(|cell| matches!(cell, Cell::Entrance(e) if e.kind == kind)),
                1
            );
        }
        assert_eq!(count_items(&grid, |_| true), 0);
    }

    #[test]
    fn test_first_level_stairs_and_chest() {
        for seed in 0..10 {
            let grid = populated(1, seed);
            assert_eq!(count_stairs(&grid, StairDirection::Up), 0);
            assert_eq!(count_stairs(&grid, StairDirection::Down), 1);
            assert_eq!(count_items(&grid, |kind| matches!(kind, ItemKind::Chest { .. })), 1);
        }
    }

    #[test]
    fn test_terminal_levels_have_no_down_stairs() {
        for level in [10, 13] {
            let grid = populated(level, 3);
            assert_eq!(count_stairs(&grid, StairDirection::Up), 1);
            assert_eq!(count_stairs(&grid, StairDirection::Down), 0);
            assert_eq!(
                count_items(&grid, |kind| matches!(kind, ItemKind::Trap(TrapKind::TrapDoor))),
                0
            );
        }
    }

    #[test]
    fn test_stairs_target_neighbouring_levels() {
        let grid = populated(5, 9);
        for (_, cell) in grid.iter() {
            if let Cell::Stairs(stairs) = cell {
                let expected = match stairs.direction {
                    StairDirection::Up => 4,
                    StairDirection::Down => 6,
                };
                assert_eq!(stairs.target_level, expected);
            }
        }
    }

    #[test]
    fn test_volcano_levels_have_no_gems() {
        for seed in 0..5 {
            let grid = populated(12, seed);
            assert_eq!(count_items(&grid, |kind| matches!(kind, ItemKind::Gem { .. })), 0);
        }
    }

    #[test]
    fn test_loot_counts_within_policy() {
        for seed in 0..10 {
            let grid = populated(4, seed);
            let potions = count_items(&grid, |kind| matches!(kind, ItemKind::Potion(_)));
            let scrolls = count_items(&grid, |kind| matches!(kind, ItemKind::Scroll(_)));
            let gold = count_items(&grid, |kind| matches!(kind, ItemKind::GoldPile { .. }));
            assert!((4..=7).contains(&potions), "potions {}", potions);
            assert!((4..=8).contains(&scrolls), "scrolls {}", scrolls);
            assert!((12..=23).contains(&gold), "gold {}", gold);
            let gems = count_items(&grid, |kind| matches!(kind, ItemKind::Gem { .. }));
            assert!(gems <= 4);
        }
    }

    #[test]
    fn test_gold_and_gem_values_scale_with_level() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let amount = gold_amount(3, &mut rng);
            assert!((34..=70).contains(&amount));
            assert_eq!((amount - 34) % 12, 0);
        }
        let grid = populated(2, 14);
        for (_, cell) in grid.iter() {
            if let Cell::Item(Item {
                kind: ItemKind::Gem { stone, value },
                ..
            }) = cell
            {
                let range = match stone {
                    GemStone::Diamond => 10..=30,
                    GemStone::Ruby => 6..=18,
                    GemStone::Emerald => 4..=12,
                    GemStone::Sapphire => 2..=8,
                };
                assert!(range.contains(value));
            }
        }
    }

    #[test]
    fn test_bessmans_hammer_only_on_first_level() {
        for seed in 0..40 {
            let grid = populated(2, seed);
            assert_eq!(
                count_items(&grid, |kind| matches!(
                    kind,
                    ItemKind::Weapon {
                        kind: WeaponKind::BessmansHammer,
                        ..
                    }
                )),
                0
            );
        }
    }

    #[test]
    fn test_second_tier_never_above_level_four() {
        for seed in 0..40 {
            let grid = populated(3, seed);
            assert_eq!(
                count_items(&grid, |kind| matches!(
                    kind,
                    ItemKind::Weapon {
                        kind: WeaponKind::SunSword,
                        ..
                    } | ItemKind::Belt { .. }
                        | ItemKind::Ring {
                            kind: RingKind::Energy,
                            ..
                        }
                )),
                0
            );
        }
    }

    #[test]
    fn test_rare_tables_respect_odds() {
        let tables: [&[RareDrop]; 5] = [&EQUIPMENT, &FIRST_LEVEL_EQUIPMENT, &SECOND_TIER, &RINGS, &SPECIALS];
        for table in tables {
            assert!(table.iter().all(|drop| drop.odds > 0 && drop.odds < 151));
        }
    }

    #[test]
    fn test_populate_rejects_wrong_category() {
        let mut grid = floor_grid();
        let mut rng = StdRng::seed_from_u64(1);
        let mut placer = Placer::new(&mut grid, &mut rng, false);
        assert!(matches!(
            populate(3, LevelCategory::Volcano, &mut placer),
            Err(BurrowError::CategoryMismatch { level: 3, .. })
        ));
        assert!(populate(30, LevelCategory::Dungeon, &mut placer).is_err());
    }

    #[test]
    fn test_population_is_deterministic() {
        assert_eq!(populated(6, 31), populated(6, 31));
    }
}
