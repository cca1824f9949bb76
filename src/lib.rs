//! # Burrow
//!
//! Procedural maze carving and level population for a grid-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! Burrow turns a level number into a fully furnished level. The pipeline is split
//! into small pieces that all share one seeded random number generator:
//!
//! - **Game model**: positions, directions, the [`Cell`] sum type, items and monsters
//! - **Grid**: a fixed-size arena of cells addressed by [`Position`]
//! - **Carving**: the classic "eating" walk, or randomized frontier growth
//! - **Rooms**: walled treasure rooms with a single door
//! - **Placement**: random-walk placement of objects, including rare (n/151) drops
//! - **Population**: the per-level policy table for stairs, features, loot and gear
//! - **Encounters**: level-appropriate monster spawning
//!
//! A given seed always reproduces the same level.

pub mod game;
pub mod generation;

// Core module re-exports
pub use game::*;
pub use generation::*;

/// Core error type for the Burrow generation engine.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Grid dimensions are too small to carve or populate
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Level number has no category
    #[error("Unknown level number: {0}")]
    UnknownLevel(u32),

    /// Population was requested with a category that does not belong to the level
    #[error("Level {level} cannot be populated as {category:?}")]
    CategoryMismatch {
        level: u32,
        category: generation::LevelCategory,
    },

    /// The grid interior holds no empty cell to place an object on
    #[error("No open cell available for placement")]
    NoOpenCell,

    /// Monster handle is not registered on this level
    #[error("Unknown monster: {0:?}")]
    UnknownMonster(game::MonsterId),

    /// Position lies outside the grid
    #[error("Invalid position: {0:?}")]
    InvalidPosition(game::Position),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Grid and placement constants.
pub mod config {
    /// Default level width in cells
    pub const DEFAULT_WIDTH: u32 = 67;

    /// Default level height in cells
    pub const DEFAULT_HEIGHT: u32 = 17;

    /// Smallest width that leaves room for treasure room bands
    pub const MIN_WIDTH: u32 = 20;

    /// Smallest height that leaves room for a treasure room row
    pub const MIN_HEIGHT: u32 = 12;

    /// Denominator of every rare placement roll
    pub const RARE_MODULUS: u32 = 151;
}

/// Level numbering.
pub mod levels {
    /// The town level holding the entrances
    pub const HOME: u32 = 0;

    /// First dungeon level
    pub const FIRST_DUNGEON: u32 = 1;

    /// Deepest dungeon level
    pub const MAX_DUNGEON: u32 = 10;

    /// First volcano level, reached through the volcanic shaft
    pub const FIRST_VOLCANO: u32 = MAX_DUNGEON + 1;

    /// Deepest volcano level
    pub const MAX_VOLCANO: u32 = 13;

    /// Interior destinations behind the town entrances
    pub const PLAYER_HOME: u32 = 14;
    pub const COLLEGE: u32 = 15;
    pub const BANK: u32 = 16;
    pub const STORE: u32 = 17;
    pub const TRADING_POST: u32 = 18;
    pub const REVENUE_OFFICE: u32 = 19;

    /// Returns true when no down stairs are generated on this level.
    pub fn is_terminal(level: u32) -> bool {
        level == MAX_DUNGEON || level == MAX_VOLCANO
    }
}
