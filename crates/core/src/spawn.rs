//! Spawn module - seeded choice of new tiles
//!
//! New tiles draw their value uniformly from the prefix of
//! [`EMOJI_LIST`](crate::types::EMOJI_LIST) unlocked at the current level,
//! and their cell uniformly from the empty cells of the grid.
//!
//! The generator is a seeded PCG so a game can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::grid::Grid;
use crate::types::{level_cap, Position, EMOJI_LIST};

#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: Pcg32,
    seed: u64,
}

impl TileSpawner {
    /// Create a spawner with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this spawner was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values a spawn may pick from at `level`
    pub fn choices(level: u32) -> usize {
        level_cap(level).clamp(1, EMOJI_LIST.len())
    }

    /// Pick a spawn value for `level`
    pub fn pick_value(&mut self, level: u32) -> &'static str {
        let idx = self.rng.random_range(0..Self::choices(level));
        EMOJI_LIST[idx]
    }

    /// Pick an empty cell, or `None` when the grid is full
    pub fn pick_cell(&mut self, grid: &Grid) -> Option<Position> {
        let empty = grid.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..empty.len());
        Some(empty[idx])
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;

    #[test]
    fn test_spawner_deterministic() {
        let mut a = TileSpawner::new(12345);
        let mut b = TileSpawner::new(12345);
        let grid = Grid::new(5).unwrap();

        for level in [1, 2, 3, 1, 3] {
            assert_eq!(a.pick_value(level), b.pick_value(level));
            assert_eq!(a.pick_cell(&grid), b.pick_cell(&grid));
        }
        assert_eq!(a.seed(), 12345);
    }

    #[test]
    fn test_values_respect_level_cap() {
        let mut spawner = TileSpawner::new(7);
        for level in 1..=3 {
            let allowed = &EMOJI_LIST[..TileSpawner::choices(level)];
            for _ in 0..200 {
                assert!(allowed.contains(&spawner.pick_value(level)));
            }
        }
    }

    #[test]
    fn test_level_one_eventually_draws_both_hands() {
        let mut spawner = TileSpawner::new(99);
        let drawn: Vec<_> = (0..200).map(|_| spawner.pick_value(1)).collect();
        assert!(drawn.contains(&EMOJI_LIST[0]));
        assert!(drawn.contains(&EMOJI_LIST[1]));
    }

    #[test]
    fn test_unknown_level_uses_default_cap() {
        assert_eq!(TileSpawner::choices(0), 1);
        assert_eq!(TileSpawner::choices(42), 1);
        let mut spawner = TileSpawner::new(3);
        assert_eq!(spawner.pick_value(42), EMOJI_LIST[0]);
    }

    #[test]
    fn test_pick_cell_only_returns_empty_cells() {
        let mut grid = Grid::new(2).unwrap();
        grid.set(Position::new(0, 0), Tile::new(EMOJI_LIST[0]));
        grid.set(Position::new(1, 0), Tile::new(EMOJI_LIST[0]));
        grid.set(Position::new(0, 1), Tile::new(EMOJI_LIST[0]));

        let mut spawner = TileSpawner::new(5);
        for _ in 0..20 {
            assert_eq!(spawner.pick_cell(&grid), Some(Position::new(1, 1)));
        }

        grid.set(Position::new(1, 1), Tile::new(EMOJI_LIST[1]));
        assert_eq!(spawner.pick_cell(&grid), None);
    }
}
