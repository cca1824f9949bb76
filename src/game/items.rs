//! # Items
//!
//! Item value types that can lie on a level: equipment, consumables, treasure and
//! terrain features.

use crate::{Color, Renderable, Visible};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Dagger,
    Spear,
    Flail,
    BattleAxe,
    LongSword,
    TwoHandedSword,
    SwordOfSlashing,
    SunSword,
    BessmansHammer,
}

impl WeaponKind {
    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Dagger => "dagger",
            WeaponKind::Spear => "spear",
            WeaponKind::Flail => "flail",
            WeaponKind::BattleAxe => "battle axe",
            WeaponKind::LongSword => "longsword",
            WeaponKind::TwoHandedSword => "2 handed sword",
            WeaponKind::SwordOfSlashing => "sword of slashing",
            WeaponKind::SunSword => "sunsword",
            WeaponKind::BessmansHammer => "Bessman's flailing hammer",
        }
    }

    /// Base weapon class before enchantment.
    pub fn base_damage(self) -> i32 {
        match self {
            WeaponKind::Dagger => 3,
            WeaponKind::Spear => 10,
            WeaponKind::Flail => 14,
            WeaponKind::BattleAxe => 17,
            WeaponKind::LongSword => 22,
            WeaponKind::TwoHandedSword => 26,
            WeaponKind::SwordOfSlashing => 30,
            WeaponKind::SunSword => 32,
            WeaponKind::BessmansHammer => 35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorKind {
    Leather,
    StuddedLeather,
    RingMail,
    ChainMail,
    SplintMail,
    PlateMail,
    PlateArmor,
    StainlessPlateArmor,
}

impl ArmorKind {
    pub fn name(self) -> &'static str {
        match self {
            ArmorKind::Leather => "leather",
            ArmorKind::StuddedLeather => "studded leather",
            ArmorKind::RingMail => "ring mail",
            ArmorKind::ChainMail => "chain mail",
            ArmorKind::SplintMail => "splint mail",
            ArmorKind::PlateMail => "plate mail",
            ArmorKind::PlateArmor => "plate armor",
            ArmorKind::StainlessPlateArmor => "stainless plate armor",
        }
    }

    /// Base armor class before enchantment.
    pub fn base_class(self) -> i32 {
        match self {
            ArmorKind::Leather => 2,
            ArmorKind::StuddedLeather => 3,
            ArmorKind::RingMail => 5,
            ArmorKind::ChainMail => 6,
            ArmorKind::SplintMail => 7,
            ArmorKind::PlateMail => 9,
            ArmorKind::PlateArmor => 10,
            ArmorKind::StainlessPlateArmor => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RingKind {
    Regeneration,
    Protection,
    Strength,
    Energy,
}

impl RingKind {
    pub fn name(self) -> &'static str {
        match self {
            RingKind::Regeneration => "ring of regeneration",
            RingKind::Protection => "ring of protection",
            RingKind::Strength => "ring of strength",
            RingKind::Energy => "energy ring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotionKind {
    Sleep,
    Healing,
    RaiseLevel,
    IncreaseAbility,
    Wisdom,
    Strength,
    RaiseCharisma,
    Dizziness,
    Learning,
    GoldDetection,
    MonsterDetection,
    Forgetfulness,
    Water,
    Blindness,
    Confusion,
    Heroism,
    GiantStrength,
    FireResistance,
    TreasureFinding,
    InstantHealing,
    CureDianthroritis,
    Poison,
    SeeInvisible,
}

/// Relative frequency of each potion found lying in the dungeon.
const POTION_WEIGHTS: [(PotionKind, u32); 23] = [
    (PotionKind::Sleep, 2),
    (PotionKind::Healing, 3),
    (PotionKind::RaiseLevel, 1),
    (PotionKind::IncreaseAbility, 2),
    (PotionKind::Wisdom, 2),
    (PotionKind::Strength, 2),
    (PotionKind::RaiseCharisma, 2),
    (PotionKind::Dizziness, 2),
    (PotionKind::Learning, 1),
    (PotionKind::GoldDetection, 1),
    (PotionKind::MonsterDetection, 3),
    (PotionKind::Forgetfulness, 2),
    (PotionKind::Water, 2),
    (PotionKind::Blindness, 1),
    (PotionKind::Confusion, 1),
    (PotionKind::Heroism, 1),
    (PotionKind::GiantStrength, 1),
    (PotionKind::FireResistance, 1),
    (PotionKind::TreasureFinding, 1),
    (PotionKind::InstantHealing, 4),
    (PotionKind::CureDianthroritis, 2),
    (PotionKind::Poison, 2),
    (PotionKind::SeeInvisible, 2),
];

impl PotionKind {
    pub fn name(self) -> &'static str {
        match self {
            PotionKind::Sleep => "sleep",
            PotionKind::Healing => "healing",
            PotionKind::RaiseLevel => "raise level",
            PotionKind::IncreaseAbility => "increase ability",
            PotionKind::Wisdom => "wisdom",
            PotionKind::Strength => "strength",
            PotionKind::RaiseCharisma => "raise charisma",
            PotionKind::Dizziness => "dizziness",
            PotionKind::Learning => "learning",
            PotionKind::GoldDetection => "gold detection",
            PotionKind::MonsterDetection => "monster detection",
            PotionKind::Forgetfulness => "forgetfulness",
            PotionKind::Water => "water",
            PotionKind::Blindness => "blindness",
            PotionKind::Confusion => "confusion",
            PotionKind::Heroism => "heroism",
            PotionKind::GiantStrength => "giant strength",
            PotionKind::FireResistance => "fire resistance",
            PotionKind::TreasureFinding => "treasure finding",
            PotionKind::InstantHealing => "instant healing",
            PotionKind::CureDianthroritis => "cure dianthroritis",
            PotionKind::Poison => "poison",
            PotionKind::SeeInvisible => "see invisible",
        }
    }

    /// Draws a potion from the dungeon frequency table.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        POTION_WEIGHTS
            .choose_weighted(rng, |entry| entry.1)
            .map(|entry| entry.0)
            .unwrap_or(PotionKind::Water)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollKind {
    EnchantArmor,
    EnchantWeapon,
    Enlightenment,
    BlankPaper,
    CreateMonster,
    CreateArtifact,
    AggravateMonsters,
    TimeWarp,
    Teleportation,
    ExpandedAwareness,
    HasteMonsters,
    HealMonsters,
    SpiritProtection,
    UndeadProtection,
    Stealth,
    MagicMapping,
    HoldMonsters,
    GemPerfection,
    SpellExtension,
    Identify,
    RemoveCurse,
    Annihilation,
    Pulverization,
    LifeProtection,
}

/// Relative frequency of each scroll found lying in the dungeon.
const SCROLL_WEIGHTS: [(ScrollKind, u32); 24] = [
    (ScrollKind::EnchantArmor, 4),
    (ScrollKind::EnchantWeapon, 5),
    (ScrollKind::Enlightenment, 2),
    (ScrollKind::BlankPaper, 1),
    (ScrollKind::CreateMonster, 3),
    (ScrollKind::CreateArtifact, 5),
    (ScrollKind::AggravateMonsters, 5),
    (ScrollKind::TimeWarp, 4),
    (ScrollKind::Teleportation, 2),
    (ScrollKind::ExpandedAwareness, 2),
    (ScrollKind::HasteMonsters, 4),
    (ScrollKind::HealMonsters, 3),
    (ScrollKind::SpiritProtection, 3),
    (ScrollKind::UndeadProtection, 4),
    (ScrollKind::Stealth, 2),
    (ScrollKind::MagicMapping, 2),
    (ScrollKind::HoldMonsters, 3),
    (ScrollKind::GemPerfection, 2),
    (ScrollKind::SpellExtension, 2),
    (ScrollKind::Identify, 3),
    (ScrollKind::RemoveCurse, 4),
    (ScrollKind::Annihilation, 1),
    (ScrollKind::Pulverization, 1),
    (ScrollKind::LifeProtection, 1),
];

impl ScrollKind {
    pub fn name(self) -> &'static str {
        match self {
            ScrollKind::EnchantArmor => "enchant armor",
            ScrollKind::EnchantWeapon => "enchant weapon",
            ScrollKind::Enlightenment => "enlightenment",
            ScrollKind::BlankPaper => "blank paper",
            ScrollKind::CreateMonster => "create monster",
            ScrollKind::CreateArtifact => "create artifact",
            ScrollKind::AggravateMonsters => "aggravate monsters",
            ScrollKind::TimeWarp => "time warp",
            ScrollKind::Teleportation => "teleportation",
            ScrollKind::ExpandedAwareness => "expanded awareness",
            ScrollKind::HasteMonsters => "haste monsters",
            ScrollKind::HealMonsters => "heal monsters",
            ScrollKind::SpiritProtection => "spirit protection",
            ScrollKind::UndeadProtection => "undead protection",
            ScrollKind::Stealth => "stealth",
            ScrollKind::MagicMapping => "magic mapping",
            ScrollKind::HoldMonsters => "hold monsters",
            ScrollKind::GemPerfection => "gem perfection",
            ScrollKind::SpellExtension => "spell extension",
            ScrollKind::Identify => "identify",
            ScrollKind::RemoveCurse => "remove curse",
            ScrollKind::Annihilation => "annihilation",
            ScrollKind::Pulverization => "pulverization",
            ScrollKind::LifeProtection => "life protection",
        }
    }

    /// Draws a scroll from the dungeon frequency table.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        SCROLL_WEIGHTS
            .choose_weighted(rng, |entry| entry.1)
            .map(|entry| entry.0)
            .unwrap_or(ScrollKind::BlankPaper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemStone {
    Diamond,
    Ruby,
    Emerald,
    Sapphire,
}

impl GemStone {
    pub fn name(self) -> &'static str {
        match self {
            GemStone::Diamond => "diamond",
            GemStone::Ruby => "ruby",
            GemStone::Emerald => "emerald",
            GemStone::Sapphire => "sapphire",
        }
    }

    /// Rolls a gem value for a level. Rarer stones scale faster with depth.
    pub fn roll_value<R: Rng + ?Sized>(self, level: u32, rng: &mut R) -> u32 {
        let (scale, floor) = match self {
            GemStone::Diamond => (10, 10),
            GemStone::Ruby => (6, 6),
            GemStone::Emerald => (4, 4),
            GemStone::Sapphire => (3, 2),
        };
        rng.gen_range(0..=scale * level) + floor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Arrow,
    Teleport,
    Dart,
    TrapDoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    OrbOfDragonSlaying,
    ScarabOfNegateSpirit,
    CubeOfUndeadControl,
    DeviceOfTheftPrevention,
    AmuletOfLifePreservation,
}

impl SpecialKind {
    pub fn name(self) -> &'static str {
        match self {
            SpecialKind::OrbOfDragonSlaying => "orb of dragon slaying",
            SpecialKind::ScarabOfNegateSpirit => "scarab of negate spirit",
            SpecialKind::CubeOfUndeadControl => "cube of undead control",
            SpecialKind::DeviceOfTheftPrevention => "device of theft prevention",
            SpecialKind::AmuletOfLifePreservation => "amulet of life preservation",
        }
    }
}

/// What an item is. Enchantment attributes add to the base weapon or armor class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon { kind: WeaponKind, attribute: i32 },
    Armor { kind: ArmorKind, attribute: i32 },
    Shield { attribute: i32 },
    Ring { kind: RingKind, attribute: i32 },
    Belt { attribute: i32 },
    Potion(PotionKind),
    Scroll(ScrollKind),
    Gem { stone: GemStone, value: u32 },
    GoldPile { amount: u32 },
    Chest { level: u32 },
    Book { level: u32 },
    Altar,
    Statue,
    Pit,
    Fountain,
    Trap(TrapKind),
    Special(SpecialKind),
}

/// An item lying on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub visible: bool,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            visible: false,
        }
    }

    pub fn weapon(kind: WeaponKind, attribute: i32) -> Self {
        Self::new(ItemKind::Weapon { kind, attribute })
    }

    pub fn armor(kind: ArmorKind, attribute: i32) -> Self {
        Self::new(ItemKind::Armor { kind, attribute })
    }

    pub fn ring(kind: RingKind, attribute: i32) -> Self {
        Self::new(ItemKind::Ring { kind, attribute })
    }

    pub fn trap(kind: TrapKind) -> Self {
        Self::new(ItemKind::Trap(kind))
    }

    pub fn special(kind: SpecialKind) -> Self {
        Self::new(ItemKind::Special(kind))
    }

    /// Enchantment attribute, for items that carry one.
    pub fn attribute(&self) -> Option<i32> {
        match self.kind {
            ItemKind::Weapon { attribute, .. }
            | ItemKind::Armor { attribute, .. }
            | ItemKind::Shield { attribute }
            | ItemKind::Ring { attribute, .. }
            | ItemKind::Belt { attribute } => Some(attribute),
            _ => None,
        }
    }

    /// Display name without the enchantment suffix.
    pub fn base_name(&self) -> String {
        match self.kind {
            ItemKind::Weapon { kind, .. } => kind.name().to_string(),
            ItemKind::Armor { kind, .. } => kind.name().to_string(),
            ItemKind::Shield { .. } => "shield".to_string(),
            ItemKind::Ring { kind, .. } => kind.name().to_string(),
            ItemKind::Belt { .. } => "belt of striking".to_string(),
            ItemKind::Potion(kind) => format!("potion of {}", kind.name()),
            ItemKind::Scroll(kind) => format!("scroll of {}", kind.name()),
            ItemKind::Gem { stone, value } => format!("{} worth {} gold", stone.name(), value),
            ItemKind::GoldPile { amount } => format!("{} gold pieces", amount),
            ItemKind::Chest { .. } => "chest".to_string(),
            ItemKind::Book { .. } => "book".to_string(),
            ItemKind::Altar => "holy altar".to_string(),
            ItemKind::Statue => "great marble statue".to_string(),
            ItemKind::Pit => "pit".to_string(),
            ItemKind::Fountain => "bubbling fountain".to_string(),
            ItemKind::Trap(TrapKind::Arrow) => "arrow trap".to_string(),
            ItemKind::Trap(TrapKind::Teleport) => "teleport trap".to_string(),
            ItemKind::Trap(TrapKind::Dart) => "dart trap".to_string(),
            ItemKind::Trap(TrapKind::TrapDoor) => "trap door".to_string(),
            ItemKind::Special(kind) => kind.name().to_string(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute() {
            Some(attribute) if attribute > 0 => write!(f, "{} +{}", self.base_name(), attribute),
            Some(attribute) if attribute < 0 => write!(f, "{} {}", self.base_name(), attribute),
            _ => write!(f, "{}", self.base_name()),
        }
    }
}

impl Renderable for Item {
    fn glyph(&self) -> char {
        if !self.visible {
            return ' ';
        }
        match self.kind {
            ItemKind::Weapon { .. } => ')',
            ItemKind::Armor { .. } | ItemKind::Shield { .. } => '[',
            ItemKind::Ring { .. } => '=',
            ItemKind::Belt { .. } => '{',
            ItemKind::Potion(_) => '!',
            ItemKind::Scroll(_) => '?',
            ItemKind::Gem { .. } => '*',
            ItemKind::GoldPile { .. } => '$',
            ItemKind::Chest { .. } => 'C',
            ItemKind::Book { .. } => 'B',
            ItemKind::Altar => 'A',
            ItemKind::Statue => '&',
            ItemKind::Pit => 'P',
            ItemKind::Fountain => 'F',
            ItemKind::Trap(_) => '^',
            ItemKind::Special(SpecialKind::AmuletOfLifePreservation) => '"',
            ItemKind::Special(_) => '~',
        }
    }

    fn fg(&self) -> Color {
        match self.kind {
            ItemKind::Gem { stone: GemStone::Diamond, .. } => Color::White,
            ItemKind::Gem { stone: GemStone::Ruby, .. } => Color::Red,
            ItemKind::Gem { stone: GemStone::Emerald, .. } => Color::Green,
            ItemKind::Gem { stone: GemStone::Sapphire, .. } => Color::Blue,
            ItemKind::GoldPile { .. } => Color::Yellow,
            ItemKind::Fountain => Color::Cyan,
            ItemKind::Trap(_) | ItemKind::Pit => Color::Red,
            ItemKind::Special(_) => Color::Magenta,
            _ => Color::Default,
        }
    }
}

impl Visible for Item {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_item_names_include_attribute() {
        assert_eq!(Item::weapon(WeaponKind::LongSword, 2).to_string(), "longsword +2");
        assert_eq!(Item::armor(ArmorKind::RingMail, -1).to_string(), "ring mail -1");
        assert_eq!(Item::armor(ArmorKind::SplintMail, 0).to_string(), "splint mail");
        assert_eq!(Item::new(ItemKind::GoldPile { amount: 30 }).to_string(), "30 gold pieces");
    }

    #[test]
    fn test_hidden_item_glyph() {
        let mut item = Item::new(ItemKind::Potion(PotionKind::Healing));
        assert_eq!(item.glyph(), ' ');
        item.set_visible(true);
        assert_eq!(item.glyph(), '!');
    }

    #[test]
    fn test_gem_value_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for level in 1..=10 {
            for _ in 0..50 {
                let diamond = GemStone::Diamond.roll_value(level, &mut rng);
                assert!((10..=10 + 10 * level).contains(&diamond));
                let sapphire = GemStone::Sapphire.roll_value(level, &mut rng);
                assert!((2..=2 + 3 * level).contains(&sapphire));
            }
        }
    }

    #[test]
    fn test_weighted_tables_cover_many_kinds() {
        let mut rng = StdRng::seed_from_u64(99);
        let potions: HashSet<_> = (0..500).map(|_| PotionKind::random(&mut rng)).collect();
        let scrolls: HashSet<_> = (0..500).map(|_| ScrollKind::random(&mut rng)).collect();
        assert!(potions.len() > 10);
        assert!(scrolls.len() > 10);
    }

    #[test]
    fn test_equipment_base_values() {
        assert_eq!(ArmorKind::PlateMail.base_class(), 9);
        assert!(WeaponKind::SunSword.base_damage() > WeaponKind::Dagger.base_damage());
    }
}
