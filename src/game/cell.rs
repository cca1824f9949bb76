//! # Cells
//!
//! The closed set of values that can occupy one grid slot, and the display
//! capabilities every placeable object provides.

use crate::levels;
use crate::{Item, MonsterId, MonsterRegistry};
use serde::{Deserialize, Serialize};

/// Terminal colors a glyph can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Whatever the terminal uses by default
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Display capability required from every placeable object.
pub trait Renderable {
    /// Character drawn for this object.
    fn glyph(&self) -> char;

    /// Foreground color of the glyph.
    fn fg(&self) -> Color {
        Color::Default
    }

    /// Background color of the glyph.
    fn bg(&self) -> Color {
        Color::Default
    }
}

/// Optional visibility capability.
///
/// Objects implementing this start hidden unless the level is generated in
/// reveal mode.
pub trait Visible {
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
}

/// Resolved glyph and colors for one grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDisplay {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl CellDisplay {
    pub fn of<R: Renderable + ?Sized>(object: &R) -> Self {
        Self {
            glyph: object.glyph(),
            fg: object.fg(),
            bg: object.bg(),
        }
    }

    /// The blank glyph drawn for anything not yet seen.
    pub fn blank() -> Self {
        Self {
            glyph: ' ',
            fg: Color::Default,
            bg: Color::Default,
        }
    }
}

/// Glyph for a wall segment.
pub const WALL_GLYPH: char = '#';
/// Glyph for visible floor.
pub const FLOOR_GLYPH: char = '.';

/// A door into a treasure room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub open: bool,
    pub visible: bool,
    /// Identifies the room this door belongs to (1-9)
    pub tag: u8,
}

impl Door {
    pub fn closed(tag: u8, visible: bool) -> Self {
        Self {
            open: false,
            visible,
            tag,
        }
    }
}

impl Renderable for Door {
    fn glyph(&self) -> char {
        match (self.visible, self.open) {
            (false, _) => ' ',
            (true, true) => '\'',
            (true, false) => '+',
        }
    }

    fn fg(&self) -> Color {
        Color::Yellow
    }
}

impl Visible for Door {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Direction of travel for a staircase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairDirection {
    Up,
    Down,
}

/// Stairs leading to an adjacent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stairs {
    pub direction: StairDirection,
    pub target_level: u32,
    pub visible: bool,
}

impl Stairs {
    pub fn up(from_level: u32) -> Self {
        Self {
            direction: StairDirection::Up,
            target_level: from_level.saturating_sub(1),
            visible: false,
        }
    }

    pub fn down(from_level: u32) -> Self {
        Self {
            direction: StairDirection::Down,
            target_level: from_level + 1,
            visible: false,
        }
    }
}

impl Renderable for Stairs {
    fn glyph(&self) -> char {
        if !self.visible {
            return ' ';
        }
        match self.direction {
            StairDirection::Up => '<',
            StairDirection::Down => '>',
        }
    }

    fn fg(&self) -> Color {
        Color::White
    }
}

impl Visible for Stairs {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The named portals found on the home level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntranceKind {
    Dungeon,
    Home,
    College,
    Bank,
    Volcano,
    Store,
    TradingPost,
    RevenueOffice,
}

impl EntranceKind {
    /// Every entrance, in the order they are placed on the home level.
    pub const ALL: [EntranceKind; 8] = [
        EntranceKind::Dungeon,
        EntranceKind::Home,
        EntranceKind::College,
        EntranceKind::Bank,
        EntranceKind::Volcano,
        EntranceKind::Store,
        EntranceKind::TradingPost,
        EntranceKind::RevenueOffice,
    ];

    pub fn target_level(self) -> u32 {
        match self {
            EntranceKind::Dungeon => levels::FIRST_DUNGEON,
            EntranceKind::Home => levels::PLAYER_HOME,
            EntranceKind::College => levels::COLLEGE,
            EntranceKind::Bank => levels::BANK,
            EntranceKind::Volcano => levels::FIRST_VOLCANO,
            EntranceKind::Store => levels::STORE,
            EntranceKind::TradingPost => levels::TRADING_POST,
            EntranceKind::RevenueOffice => levels::REVENUE_OFFICE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntranceKind::Dungeon => "the dungeon entrance",
            EntranceKind::Home => "your home",
            EntranceKind::College => "the college",
            EntranceKind::Bank => "the bank",
            EntranceKind::Volcano => "the volcanic shaft",
            EntranceKind::Store => "the general store",
            EntranceKind::TradingPost => "the trading post",
            EntranceKind::RevenueOffice => "the revenue office",
        }
    }

    fn glyph(self) -> char {
        match self {
            EntranceKind::Dungeon => 'E',
            EntranceKind::Home => 'H',
            EntranceKind::College => 'C',
            EntranceKind::Bank => 'B',
            EntranceKind::Volcano => 'V',
            EntranceKind::Store => 'S',
            EntranceKind::TradingPost => 'P',
            EntranceKind::RevenueOffice => 'R',
        }
    }
}

/// A named portal to a special level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrance {
    pub kind: EntranceKind,
    pub target_level: u32,
}

impl Entrance {
    pub fn new(kind: EntranceKind) -> Self {
        Self {
            kind,
            target_level: kind.target_level(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl Renderable for Entrance {
    fn glyph(&self) -> char {
        self.kind.glyph()
    }

    fn fg(&self) -> Color {
        Color::Cyan
    }
}

/// One grid slot's occupant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable rock
    Wall { visible: bool },
    /// Passable floor
    Empty { visible: bool },
    Door(Door),
    Stairs(Stairs),
    Entrance(Entrance),
    Item(Item),
    /// Handle into the level's monster registry
    Monster(MonsterId),
}

impl Cell {
    pub fn wall(visible: bool) -> Self {
        Cell::Wall { visible }
    }

    /// Unseen floor.
    pub fn empty() -> Self {
        Cell::Empty { visible: false }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty { .. })
    }

    pub fn monster_id(&self) -> Option<MonsterId> {
        match self {
            Cell::Monster(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether a creature may enter this cell.
    pub fn is_passable(&self) -> bool {
        match self {
            Cell::Wall { .. } | Cell::Monster(_) => false,
            Cell::Door(door) => door.open,
            _ => true,
        }
    }

    /// Whether a creature standing here may later walk off and leave it intact.
    pub fn is_displaceable(&self) -> bool {
        matches!(
            self,
            Cell::Empty { .. } | Cell::Stairs(_) | Cell::Entrance(_) | Cell::Item(_)
        )
    }

    /// Applies a visibility flag when the occupant supports one.
    ///
    /// Returns false for occupants without their own visibility: entrances are
    /// always shown, and a monster's flag lives on the registered monster.
    pub fn set_visible(&mut self, flag: bool) -> bool {
        match self {
            Cell::Wall { visible } | Cell::Empty { visible } => *visible = flag,
            Cell::Door(door) => door.set_visible(flag),
            Cell::Stairs(stairs) => stairs.set_visible(flag),
            Cell::Item(item) => item.set_visible(flag),
            Cell::Entrance(_) | Cell::Monster(_) => return false,
        }
        true
    }

    /// Resolves the glyph and colors to draw, looking monsters up in `monsters`.
    pub fn display(&self, monsters: &MonsterRegistry) -> CellDisplay {
        match self {
            Cell::Wall { visible: true } => CellDisplay {
                glyph: WALL_GLYPH,
                fg: Color::White,
                bg: Color::Default,
            },
            Cell::Empty { visible: true } => CellDisplay {
                glyph: FLOOR_GLYPH,
                fg: Color::Default,
                bg: Color::Default,
            },
            Cell::Wall { visible: false } | Cell::Empty { visible: false } => CellDisplay::blank(),
            Cell::Door(door) => CellDisplay::of(door),
            Cell::Stairs(stairs) => CellDisplay::of(stairs),
            Cell::Entrance(entrance) => CellDisplay::of(entrance),
            Cell::Item(item) => CellDisplay::of(item),
            Cell::Monster(id) => monsters
                .get(*id)
                .map(CellDisplay::of)
                .unwrap_or_else(CellDisplay::blank),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemKind;

    #[test]
    fn test_hidden_cells_render_blank() {
        let monsters = MonsterRegistry::new();
        assert_eq!(Cell::wall(false).display(&monsters).glyph, ' ');
        assert_eq!(Cell::empty().display(&monsters).glyph, ' ');
        assert_eq!(Cell::wall(true).display(&monsters).glyph, WALL_GLYPH);
        assert_eq!(Cell::Empty { visible: true }.display(&monsters).glyph, FLOOR_GLYPH);
    }

    #[test]
    fn test_set_visible_support() {
        let mut stairs = Cell::Stairs(Stairs::down(3));
        assert!(stairs.set_visible(true));
        assert_eq!(stairs, Cell::Stairs(Stairs { direction: StairDirection::Down, target_level: 4, visible: true }));

        let mut entrance = Cell::Entrance(Entrance::new(EntranceKind::Bank));
        assert!(!entrance.set_visible(true));

        let mut item = Cell::Item(Item::new(ItemKind::Altar));
        assert!(item.set_visible(true));
        assert_eq!(item.display(&MonsterRegistry::new()).glyph, 'A');
    }

    #[test]
    fn test_passability() {
        assert!(!Cell::wall(true).is_passable());
        assert!(Cell::empty().is_passable());
        assert!(!Cell::Door(Door::closed(1, true)).is_passable());
        assert!(Cell::Door(Door { open: true, visible: true, tag: 1 }).is_passable());
        assert!(Cell::Stairs(Stairs::up(2)).is_passable());
        assert!(!Cell::Monster(MonsterId(0)).is_passable());
    }

    #[test]
    fn test_displaceable_cells() {
        assert!(Cell::empty().is_displaceable());
        assert!(Cell::Entrance(Entrance::new(EntranceKind::Dungeon)).is_displaceable());
        assert!(!Cell::wall(false).is_displaceable());
        assert!(!Cell::Monster(MonsterId(3)).is_displaceable());
    }

    #[test]
    fn test_entrance_targets() {
        assert_eq!(Entrance::new(EntranceKind::Dungeon).target_level, levels::FIRST_DUNGEON);
        assert_eq!(Entrance::new(EntranceKind::Volcano).target_level, levels::FIRST_VOLCANO);
        assert_eq!(EntranceKind::TradingPost.label(), "the trading post");
    }

    #[test]
    fn test_unknown_monster_renders_blank() {
        let monsters = MonsterRegistry::new();
        assert_eq!(Cell::Monster(MonsterId(42)).display(&monsters), CellDisplay::blank());
    }
}
