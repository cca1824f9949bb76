//! # Monsters
//!
//! The monster roster, spawned monster instances, and the per-level registry that
//! owns them. Grid cells refer to monsters by [`MonsterId`] only.

use crate::{BurrowError, BurrowResult, Cell, Color, Position, Renderable, Visible};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Handle of a monster registered on one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// Every monster in the game, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MonsterKind {
    Lemming = 1,
    Gnome,
    Hobgoblin,
    Jackal,
    Kobold,
    Orc,
    Snake,
    GiantCentipede,
    Jaculi,
    Troglodyte,
    GiantAnt,
    FloatingEye,
    Leprechaun,
    Nymph,
    Quasit,
    RustMonster,
    Zombie,
    AssassinBug,
    Bugbear,
    HellHound,
    IceLizard,
    Centaur,
    Troll,
    Yeti,
    WhiteDragon,
    Elf,
    GelatinousCube,
    Metamorph,
    Vortex,
    Ziller,
    VioletFungi,
    Wraith,
    Forvalaka,
    LamaNobe,
    Osequip,
    Rothe,
    Xorn,
    Vampire,
    InvisibleStalker,
    Poltergeist,
    Disenchantress,
    ShamblingMound,
    YellowMold,
    UmberHulk,
    GnomeKing,
    Mimic,
    WaterLord,
    BronzeDragon,
    GreenDragon,
    PurpleWorm,
    Xvart,
    SpiritNaga,
    SilverDragon,
    PlatinumDragon,
    GreenUrchin,
    RedDragon,
}

/// Static data shared by every monster of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterType {
    pub kind: MonsterKind,
    pub name: &'static str,
    pub glyph: char,
    pub level: u32,
    pub armor_class: i32,
    pub damage: u32,
    pub hit_points: u32,
    pub experience: u32,
}

const fn entry(
    kind: MonsterKind,
    name: &'static str,
    glyph: char,
    level: u32,
    armor_class: i32,
    damage: u32,
    hit_points: u32,
    experience: u32,
) -> MonsterType {
    MonsterType {
        kind,
        name,
        glyph,
        level,
        armor_class,
        damage,
        hit_points,
        experience,
    }
}

use MonsterKind::*;

/// The roster, indexed by `MonsterKind as usize - 1`.
pub const ROSTER: [MonsterType; 56] = [
    entry(Lemming, "lemming", 'l', 1, 0, 0, 3, 1),
    entry(Gnome, "gnome", 'G', 1, 10, 1, 2, 2),
    entry(Hobgoblin, "hobgoblin", 'H', 1, 14, 2, 5, 2),
    entry(Jackal, "jackal", 'J', 1, 17, 1, 3, 1),
    entry(Kobold, "kobold", 'K', 1, 20, 1, 4, 1),
    entry(Orc, "orc", 'O', 2, 12, 1, 10, 2),
    entry(Snake, "snake", 'S', 2, 15, 1, 3, 1),
    entry(GiantCentipede, "giant centipede", 'c', 2, 14, 1, 6, 2),
    entry(Jaculi, "jaculi", 'j', 2, 20, 1, 4, 1),
    entry(Troglodyte, "troglodyte", 't', 2, 10, 2, 4, 5),
    entry(GiantAnt, "giant ant", 'A', 2, 8, 1, 5, 4),
    entry(FloatingEye, "floating eye", 'E', 3, 8, 1, 12, 2),
    entry(Leprechaun, "leprechaun", 'L', 3, 3, 0, 10, 9),
    entry(Nymph, "nymph", 'n', 3, 3, 0, 8, 9),
    entry(Quasit, "quasit", 'q', 3, 5, 3, 10, 20),
    entry(RustMonster, "rust monster", 'r', 3, 4, 0, 20, 28),
    entry(Zombie, "zombie", 'Z', 3, 12, 2, 30, 10),
    entry(AssassinBug, "assassin bug", 'a', 4, 9, 3, 20, 30),
    entry(Bugbear, "bugbear", 'b', 4, 5, 4, 20, 12),
    entry(HellHound, "hell hound", 'h', 4, 5, 2, 16, 20),
    entry(IceLizard, "ice lizard", 'i', 4, 11, 2, 22, 28),
    entry(Centaur, "centaur", 'C', 4, 6, 4, 24, 40),
    entry(Troll, "troll", 'T', 5, 4, 5, 60, 80),
    entry(Yeti, "yeti", 'Y', 5, 6, 4, 50, 50),
    entry(WhiteDragon, "white dragon", 'd', 5, 2, 4, 70, 100),
    entry(Elf, "elf", 'e', 5, 8, 1, 22, 40),
    entry(GelatinousCube, "gelatinous cube", 'g', 5, 9, 1, 22, 36),
    entry(Metamorph, "metamorph", 'm', 6, 7, 3, 30, 40),
    entry(Vortex, "vortex", 'v', 6, 4, 3, 32, 55),
    entry(Ziller, "ziller", 'z', 6, 15, 3, 30, 60),
    entry(VioletFungi, "violet fungi", 'F', 6, 12, 3, 38, 100),
    entry(Wraith, "wraith", 'W', 6, 3, 1, 30, 40),
    entry(Forvalaka, "forvalaka", 'f', 6, 2, 5, 50, 55),
    entry(LamaNobe, "lama nobe", 'N', 7, 7, 3, 35, 80),
    entry(Osequip, "osequip", 'o', 7, 4, 4, 35, 100),
    entry(Rothe, "rothe", 'R', 7, 15, 5, 50, 250),
    entry(Xorn, "xorn", 'X', 7, 0, 6, 60, 300),
    entry(Vampire, "vampire", 'V', 7, 3, 4, 50, 400),
    entry(InvisibleStalker, "invisible stalker", 'I', 7, 3, 6, 50, 350),
    entry(Poltergeist, "poltergeist", 'p', 8, 1, 8, 50, 450),
    entry(Disenchantress, "disenchantress", 'Q', 8, 3, 1, 50, 500),
    entry(ShamblingMound, "shambling mound", 's', 8, 2, 5, 45, 400),
    entry(YellowMold, "yellow mold", 'y', 8, 12, 4, 35, 250),
    entry(UmberHulk, "umber hulk", 'U', 8, 3, 7, 65, 600),
    entry(GnomeKing, "gnome king", 'k', 9, -1, 10, 100, 3000),
    entry(Mimic, "mimic", 'M', 9, 5, 6, 55, 99),
    entry(WaterLord, "water lord", 'w', 9, -10, 15, 150, 15000),
    entry(BronzeDragon, "bronze dragon", 'D', 9, 2, 9, 80, 4000),
    entry(GreenDragon, "green dragon", 'D', 9, 3, 8, 70, 2500),
    entry(PurpleWorm, "purple worm", 'P', 9, -1, 11, 120, 15000),
    entry(Xvart, "xvart", 'x', 9, -2, 12, 90, 1000),
    entry(SpiritNaga, "spirit naga", 'u', 10, -20, 12, 95, 20000),
    entry(SilverDragon, "silver dragon", 'D', 10, -1, 12, 100, 10000),
    entry(PlatinumDragon, "platinum dragon", 'D', 10, -5, 15, 130, 24000),
    entry(GreenUrchin, "green urchin", 'U', 10, -3, 12, 85, 5000),
    entry(RedDragon, "red dragon", 'D', 10, -2, 13, 140, 14000),
];

/// Cumulative roster size available at each effective level 1..=12.
const LEVEL_LIMITS: [usize; 12] = [5, 11, 17, 22, 27, 33, 39, 42, 46, 50, 53, 56];

impl MonsterKind {
    /// Static data for this kind.
    pub fn info(self) -> &'static MonsterType {
        &ROSTER[self as usize - 1]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Draws a monster kind appropriate for a level.
    ///
    /// Shallow levels draw from the whole roster up to their limit; from effective
    /// level 5 on, only the three most recent bands are eligible. The water lord
    /// only appears where it is placed deliberately.
    pub fn for_level<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Self {
        let effective = level.clamp(1, LEVEL_LIMITS.len() as u32) as usize;
        let upper = LEVEL_LIMITS[effective - 1];
        let lower = if effective < 5 {
            1
        } else {
            LEVEL_LIMITS[effective - 4] + 1
        };
        loop {
            let kind = ROSTER[rng.gen_range(lower..=upper) - 1].kind;
            if kind != WaterLord {
                return kind;
            }
        }
    }
}

/// A spawned creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub position: Position,
    pub hit_points: u32,
    pub visible: bool,
    /// Whatever occupied the monster's cell before it arrived
    pub displaced: Cell,
}

impl Monster {
    fn new(id: MonsterId, kind: MonsterKind) -> Self {
        Self {
            id,
            kind,
            position: Position::origin(),
            hit_points: kind.info().hit_points,
            visible: false,
            displaced: Cell::empty(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl Renderable for Monster {
    fn glyph(&self) -> char {
        if self.visible {
            self.kind.info().glyph
        } else {
            ' '
        }
    }

    fn fg(&self) -> Color {
        match self.kind.info().glyph {
            'D' | 'd' => Color::Red,
            _ => Color::Default,
        }
    }
}

impl Visible for Monster {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Owns every monster on a level. Ids are never reused, so a stale handle
/// resolves to nothing instead of to another monster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterRegistry {
    slots: Vec<Option<Monster>>,
}

impl MonsterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh monster of `kind` and returns its handle.
    pub fn register(&mut self, kind: MonsterKind) -> MonsterId {
        let id = MonsterId(self.slots.len() as u32);
        self.slots.push(Some(Monster::new(id, kind)));
        id
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.slots.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Removes a monster, returning it.
    pub fn remove(&mut self, id: MonsterId) -> BurrowResult<Monster> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .ok_or(BurrowError::UnknownMonster(id))
    }

    /// Live monsters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roster_order_matches_kinds() {
        for (index, monster_type) in ROSTER.iter().enumerate() {
            assert_eq!(monster_type.kind as usize, index + 1);
        }
        assert_eq!(MonsterKind::RedDragon.info().name, "red dragon");
    }

    #[test]
    fn test_shallow_levels_draw_weak_monsters() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let kind = MonsterKind::for_level(1, &mut rng);
            assert!((kind as usize) <= 5, "{:?} is too strong for level 1", kind);
        }
        // Level 0 behaves like level 1
        for _ in 0..50 {
            assert!((MonsterKind::for_level(0, &mut rng) as usize) <= 5);
        }
    }

    #[test]
    fn test_deep_levels_use_sliding_window() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let kind = MonsterKind::for_level(10, &mut rng) as usize;
            assert!((40..=50).contains(&kind));
            assert_ne!(kind, MonsterKind::WaterLord as usize);
        }
        for _ in 0..200 {
            let kind = MonsterKind::for_level(13, &mut rng) as usize;
            assert!((47..=56).contains(&kind));
        }
    }

    #[test]
    fn test_registry_handles() {
        let mut registry = MonsterRegistry::new();
        let first = registry.register(MonsterKind::Gnome);
        let second = registry.register(MonsterKind::Kobold);
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(first).map(|m| m.kind), Some(MonsterKind::Gnome));
        assert_eq!(registry.get(first).map(|m| m.displaced.clone()), Some(Cell::empty()));

        let removed = registry.remove(first).unwrap();
        assert_eq!(removed.id, first);
        assert!(registry.get(first).is_none());
        assert!(registry.remove(first).is_err());
        assert_eq!(registry.len(), 1);

        // Ids are not recycled
        let third = registry.register(MonsterKind::Orc);
        assert_eq!(third, MonsterId(2));
    }

    #[test]
    fn test_monster_visibility_controls_glyph() {
        let mut registry = MonsterRegistry::new();
        let id = registry.register(MonsterKind::Troll);
        let monster = registry.get_mut(id).unwrap();
        assert_eq!(monster.glyph(), ' ');
        monster.set_visible(true);
        assert_eq!(monster.glyph(), 'T');
    }
}
