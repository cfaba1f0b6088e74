// level.rs - Deterministic level generation and the level catalog
//
// Levels are regenerated on every start and never persisted, so the same level
// number has to produce the same pairing every time. Level 1 is a fixed
// tutorial layout; every later level is drawn from a generator seeded with the
// level number.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::palette::ColorId;
use crate::vocabulary::{WordPair, VOCABULARY};

pub const TUTORIAL_LEVEL: u32 = 1;
pub const LAST_LEVEL: u32 = 100;

pub const TUTORIAL_GRID_SIZE: u32 = 3;
pub const GENERATED_GRID_SIZE: u32 = 6;
pub const MIN_PAIRS: usize = 3;
pub const MAX_PAIRS: usize = 4;

// Rejection sampling below only terminates while every pair fits on the grid.
const_assert!((GENERATED_GRID_SIZE * GENERATED_GRID_SIZE) as usize >= 2 * MAX_PAIRS);
const_assert!(VOCABULARY.len() >= MIN_PAIRS);

/// 1-indexed grid cell, `col` and `row` in `1..=grid_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

impl GridPosition {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// One word/meaning pair and the grid cells it was generated on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub pos_a: GridPosition,
    pub pos_b: GridPosition,
    pub color: ColorId,
    pub word: String,
    pub meaning: String,
}

impl Pair {
    fn new(pos_a: GridPosition, pos_b: GridPosition, color: ColorId, entry: &WordPair) -> Self {
        Self {
            pos_a,
            pos_b,
            color,
            word: entry.word.to_string(),
            meaning: entry.meaning.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub grid_size: u32,
    pub pairs: Vec<Pair>,
}

impl LevelConfig {
    pub fn tile_count(&self) -> usize {
        self.pairs.len() * 2
    }
}

/// Fixed tutorial board: three pairs on a 3x3 grid
pub fn tutorial() -> LevelConfig {
    let pair = |a: (u32, u32), b: (u32, u32), index: usize| {
        Pair::new(
            GridPosition::new(a.0, a.1),
            GridPosition::new(b.0, b.1),
            ColorId::for_pair(index),
            &VOCABULARY[index],
        )
    };
    LevelConfig {
        level: TUTORIAL_LEVEL,
        grid_size: TUTORIAL_GRID_SIZE,
        pairs: vec![
            pair((1, 1), (2, 2), 0),
            pair((1, 2), (2, 1), 1),
            pair((3, 1), (3, 2), 2),
        ],
    }
}

fn random_position(rng: &mut ChaCha8Rng, grid_size: u32) -> GridPosition {
    GridPosition::new(rng.gen_range(1..=grid_size), rng.gen_range(1..=grid_size))
}

/// Generate the configuration for `level`.
///
/// Level 1 (and anything below it) is the tutorial. Every other level is a
/// pure function of its number: 3 or 4 pairs picked from the shuffled
/// vocabulary, each on two grid cells no earlier pair uses. The generator is
/// ChaCha8, whose output is fixed across releases, so a level number maps to
/// the same board on every install.
pub fn generate(level: u32) -> LevelConfig {
    if level <= TUTORIAL_LEVEL {
        return tutorial();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(level));
    let grid_size = GENERATED_GRID_SIZE;
    let num_pairs = rng.gen_range(MIN_PAIRS..=MAX_PAIRS).min(VOCABULARY.len());

    let mut entries: Vec<&WordPair> = VOCABULARY.iter().collect();
    entries.shuffle(&mut rng);
    entries.truncate(num_pairs);

    let mut used = HashSet::with_capacity(num_pairs * 2);
    let mut pairs = Vec::with_capacity(num_pairs);

    for (index, entry) in entries.into_iter().enumerate() {
        let pos_a = loop {
            let candidate = random_position(&mut rng, grid_size);
            if !used.contains(&candidate) {
                break candidate;
            }
        };
        let pos_b = loop {
            let candidate = random_position(&mut rng, grid_size);
            if candidate != pos_a && !used.contains(&candidate) {
                break candidate;
            }
        };
        used.insert(pos_a);
        used.insert(pos_b);
        pairs.push(Pair::new(pos_a, pos_b, ColorId::for_pair(index), entry));
    }

    LevelConfig {
        level,
        grid_size,
        pairs,
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Levels `1..=LAST_LEVEL`, generated up front
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

impl LevelCatalog {
    pub fn new() -> Self {
        let mut levels = Vec::with_capacity(LAST_LEVEL as usize);
        levels.push(tutorial());
        let generated: Vec<LevelConfig> = (TUTORIAL_LEVEL + 1..=LAST_LEVEL)
            .into_par_iter()
            .map(generate)
            .collect();
        levels.extend(generated);
        log::debug!("Generated level catalog with {} levels", levels.len());
        Self { levels }
    }

    pub fn contains(&self, level: u32) -> bool {
        (TUTORIAL_LEVEL..=LAST_LEVEL).contains(&level)
    }

    /// Configuration for `level`; unknown levels fall back to the tutorial
    pub fn get(&self, level: u32) -> &LevelConfig {
        if !self.contains(level) {
            log::warn!("Level {} is not in the catalog, using level {}", level, TUTORIAL_LEVEL);
            return &self.levels[0];
        }
        &self.levels[(level - TUTORIAL_LEVEL) as usize]
    }

    /// Level played after `level`; the last level wraps back to the tutorial
    pub fn next_level(&self, level: u32) -> u32 {
        if level >= LAST_LEVEL || !self.contains(level) {
            TUTORIAL_LEVEL
        } else {
            level + 1
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::new()
    }
}
