//! Scoring module - points per produced key, level progression, best score
//!
//! Points come straight from the combination table: a merge scores the key it
//! produces, an annihilation scores the key the pair would have produced.
//! Levels only widen the spawn table; they never scale points.

use crate::codec::ValueKey;
use crate::table::CombinationTable;
use crate::types::{MAX_LEVEL, SCORE_PER_LEVEL};

/// Points for producing `key` (0 for keys the table does not list)
pub fn score_for_key(table: &CombinationTable, key: &ValueKey) -> u32 {
    table.score(key)
}

/// Level management
/// Level increases every 16 points, capped at level 3
pub fn level_for_score(score: u32) -> u32 {
    (score / SCORE_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Running score plus the best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    score: u32,
    best: u32,
}

impl ScoreBoard {
    /// Start at zero with a previously persisted best score
    pub fn new(best: u32) -> Self {
        Self { score: 0, best }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    /// Add points; returns true when this raised the best score.
    pub fn award(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }
}
