//! # Generation Module
//!
//! Procedural level generation: maze carving, treasure rooms, object placement,
//! level population and monster spawning.
//!
//! Every stage draws from one [`StdRng`] seeded once per level build, so a seed
//! always reproduces the same level.

pub mod dungeon;
pub mod encounters;
pub mod placement;
pub mod population;
pub mod rooms;

pub use dungeon::*;
pub use encounters::*;
pub use placement::*;
pub use population::*;
pub use rooms::*;

use crate::{config, levels, BurrowError, BurrowResult, Cell, Grid, Level, MonsterRegistry};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which algorithm opens passages in a fresh level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarverStrategy {
    /// Sparse two-cell corridors grown by a recursive walk from (1,1)
    Eating,
    /// Randomized frontier growth; every open cell is connected
    Frontier,
}

impl Default for CarverStrategy {
    fn default() -> Self {
        CarverStrategy::Eating
    }
}

/// Configuration for level generation.
///
/// # Examples
///
/// ```
/// use burrow::GenerationConfig;
///
/// let config = GenerationConfig::default();
/// assert_eq!(config.width, 67);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Place walls and objects pre-revealed
    pub reveal: bool,
    /// Passage carving algorithm
    pub carver: CarverStrategy,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::DEFAULT_WIDTH,
            height: config::DEFAULT_HEIGHT,
            reveal: false,
            carver: CarverStrategy::Eating,
        }
    }

    /// Creates a configuration for tests: default extent with everything revealed.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            reveal: true,
            ..Self::new(seed)
        }
    }

    /// Rejects extents too small to carve and populate.
    pub fn validate(&self) -> BurrowResult<()> {
        if self.width < config::MIN_WIDTH || self.height < config::MIN_HEIGHT {
            return Err(BurrowError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> BurrowResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GenerationConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Level category; decides which population rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelCategory {
    Home,
    Dungeon,
    Volcano,
}

impl LevelCategory {
    /// Category of a level number.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::LevelCategory;
    ///
    /// assert_eq!(LevelCategory::for_level(0).unwrap(), LevelCategory::Home);
    /// assert_eq!(LevelCategory::for_level(10).unwrap(), LevelCategory::Dungeon);
    /// assert_eq!(LevelCategory::for_level(11).unwrap(), LevelCategory::Volcano);
    /// assert!(LevelCategory::for_level(14).is_err());
    /// ```
    pub fn for_level(level: u32) -> BurrowResult<Self> {
        match level {
            levels::HOME => Ok(LevelCategory::Home),
            levels::FIRST_DUNGEON..=levels::MAX_DUNGEON => Ok(LevelCategory::Dungeon),
            levels::FIRST_VOLCANO..=levels::MAX_VOLCANO => Ok(LevelCategory::Volcano),
            _ => Err(BurrowError::UnknownLevel(level)),
        }
    }

    /// Fails unless `level` belongs to this category.
    pub fn check(self, level: u32) -> BurrowResult<()> {
        if LevelCategory::for_level(level)? == self {
            Ok(())
        } else {
            Err(BurrowError::CategoryMismatch {
                level,
                category: self,
            })
        }
    }
}

/// Trait for procedural generators.
///
/// All generation stages implement this trait, giving one interface for
/// running, checking and logging them.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BurrowResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Builds a complete level: base grid, passages, treasure rooms, population and
/// monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGenerator {
    pub level: u32,
}

impl LevelGenerator {
    pub fn new(level: u32) -> Self {
        Self { level }
    }

    fn carve(&self, config: &GenerationConfig, grid: &mut Grid, rng: &mut StdRng) {
        match config.carver {
            CarverStrategy::Eating => EatingCarver::new().carve(grid, rng),
            CarverStrategy::Frontier => FrontierCarver::new().carve(grid, rng),
        }
    }
}

impl Generator<Level> for LevelGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<Level> {
        config.validate()?;
        let category = LevelCategory::for_level(self.level)?;
        log::info!(
            "Generating level {} ({:?}) with seed {}",
            self.level,
            category,
            config.seed
        );

        // The home level is open ground; everything else starts as solid rock
        let mut grid = match category {
            LevelCategory::Home => Grid::filled(config.width, config.height, Cell::Empty { visible: true }),
            LevelCategory::Dungeon | LevelCategory::Volcano => {
                let mut grid = Grid::filled(config.width, config.height, Cell::wall(config.reveal));
                self.carve(config, &mut grid, rng);
                grid
            }
        };

        let treasure_rooms = if self.level > levels::FIRST_DUNGEON {
            place_treasure_rooms(&mut grid, rng, config.reveal)?
        } else {
            Vec::new()
        };

        let mut monsters = MonsterRegistry::new();
        let spawned = {
            let mut placer = Placer::new(&mut grid, rng, config.reveal);
            populate(self.level, category, &mut placer)?;
            if category == LevelCategory::Home {
                Vec::new()
            } else {
                spawn_monsters(self.level, &mut placer, &mut monsters, true)?
            }
        };

        let level = Level {
            number: self.level,
            category,
            seed: config.seed,
            reveal: config.reveal,
            grid,
            monsters,
            spawned,
            treasure_rooms,
        };
        self.validate(&level, config)?;
        Ok(level)
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> BurrowResult<()> {
        utils::validate_level(level, config)
    }

    fn generator_type(&self) -> &'static str {
        "LevelGenerator"
    }
}

/// Utility functions for generation.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Generates one level from a config, seeding the generator from it.
    pub fn generate_level(level: u32, config: &GenerationConfig) -> BurrowResult<Level> {
        let mut rng = create_rng(config);
        LevelGenerator::new(level).generate(config, &mut rng)
    }

    /// Validates that a level meets basic requirements.
    pub fn validate_level(level: &Level, config: &GenerationConfig) -> BurrowResult<()> {
        if level.width() != config.width || level.height() != config.height {
            return Err(BurrowError::GenerationFailed(format!(
                "level is {}x{}, expected {}x{}",
                level.width(),
                level.height(),
                config.width,
                config.height
            )));
        }

        if level.grid.count(Cell::is_empty) == 0 {
            return Err(BurrowError::GenerationFailed(
                "Level has no floor cells".to_string(),
            ));
        }

        for id in &level.spawned {
            let monster = level
                .monsters
                .get(*id)
                .ok_or(BurrowError::UnknownMonster(*id))?;
            if level.grid.get(monster.position) != Some(&Cell::Monster(*id)) {
                return Err(BurrowError::GenerationFailed(format!(
                    "monster {:?} is not on its recorded position",
                    id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.width, config::DEFAULT_WIDTH);
        assert_eq!(config.height, config::DEFAULT_HEIGHT);
        assert!(!config.reveal);
        assert_eq!(config.carver, CarverStrategy::Eating);
        assert!(GenerationConfig::for_testing(1).reveal);
    }

    #[test]
    fn test_generation_config_rejects_small_grids() {
        let config = GenerationConfig {
            width: 5,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(
            config.validate(),
            Err(BurrowError::InvalidDimensions { width: 5, .. })
        ));
        assert!(utils::generate_level(1, &config).is_err());
    }

    #[test]
    fn test_level_categories() {
        assert_eq!(LevelCategory::for_level(1).unwrap(), LevelCategory::Dungeon);
        assert_eq!(LevelCategory::for_level(13).unwrap(), LevelCategory::Volcano);
        assert!(matches!(
            LevelCategory::for_level(20),
            Err(BurrowError::UnknownLevel(20))
        ));
        assert!(LevelCategory::Dungeon.check(4).is_ok());
        assert!(matches!(
            LevelCategory::Home.check(4),
            Err(BurrowError::CategoryMismatch { level: 4, .. })
        ));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: GenerationConfig = serde_json::from_str(r#"{"seed": 9, "carver": "frontier"}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.carver, CarverStrategy::Frontier);
        assert_eq!(config.width, config::DEFAULT_WIDTH);
    }

    #[test]
    fn test_generated_level_validates() {
        let config = GenerationConfig::for_testing(12345);
        let level = utils::generate_level(3, &config).unwrap();
        assert!(LevelGenerator::new(3).validate(&level, &config).is_ok());
        assert_eq!(LevelGenerator::new(3).generator_type(), "LevelGenerator");
    }

    #[test]
    fn test_home_level_is_open() {
        let config = GenerationConfig::for_testing(8);
        let level = utils::generate_level(0, &config).unwrap();
        assert_eq!(level.grid.count(Cell::is_wall), 0);
        assert!(level.spawned.is_empty());
        assert!(level.treasure_rooms.is_empty());
    }
}
