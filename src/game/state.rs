//! # Dungeon State
//!
//! Owns every level generated so far. A level is built the first time it is
//! visited and kept for the rest of the session.

use crate::generation::{GenerationConfig, Generator, LevelGenerator};
use crate::{BurrowResult, Level};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cache of generated levels keyed by level number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub config: GenerationConfig,
    levels: BTreeMap<u32, Level>,
    /// Number of levels generated so far; feeds the per-level seed
    generations: u64,
}

impl Dungeon {
    /// Creates an empty dungeon. Fails if the configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Dungeon, GenerationConfig};
    ///
    /// let mut dungeon = Dungeon::new(GenerationConfig::new(7)).unwrap();
    /// let first = dungeon.visit(1).unwrap().seed;
    /// assert_eq!(dungeon.visit(1).unwrap().seed, first);
    /// ```
    pub fn new(config: GenerationConfig) -> BurrowResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            levels: BTreeMap::new(),
            generations: 0,
        })
    }

    /// Returns the level, generating it on the first visit.
    pub fn visit(&mut self, number: u32) -> BurrowResult<&mut Level> {
        if !self.levels.contains_key(&number) {
            // The counter only advances once a level is actually cached
            let generation = self.generations + 1;
            let seed = derive_seed(self.config.seed, generation);
            log::info!(
                "Generating level {} (generation {}, seed {})",
                number,
                generation,
                seed
            );
            let config = GenerationConfig {
                seed,
                ..self.config.clone()
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let level = LevelGenerator::new(number).generate(&config, &mut rng)?;
            self.generations = generation;
            self.levels.insert(number, level);
        }
        self.levels
            .get_mut(&number)
            .ok_or_else(|| crate::BurrowError::GenerationFailed(format!("level {} missing", number)))
    }

    /// A level that has already been visited.
    pub fn level(&self, number: u32) -> Option<&Level> {
        self.levels.get(&number)
    }

    pub fn visited_levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }
}

/// Mixes the base seed with a generation counter (splitmix64 finalizer).
fn derive_seed(base: u64, counter: u64) -> u64 {
    let mut z = base.wrapping_add(counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
