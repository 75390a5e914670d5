//! Best-score persistence contract
//!
//! The engine never touches storage itself. The driver loads the best score
//! once into [`GameConfig`](crate::game_state::GameConfig) and moves through
//! [`apply_move_and_save`], which writes the store whenever the best score
//! goes up.

use std::cell::Cell;

use crate::error::Result;
use crate::game_state::{GameState, MoveResult};
use crate::types::Direction;

pub trait BestScoreStore {
    /// Previously saved best score; 0 when nothing was saved
    fn load_best_score(&self) -> u32;

    fn save_best_score(&self, score: u32);
}

/// Apply one move and save the best score when the move raised it.
///
/// Ties with the stored best and scores below it are not written.
pub fn apply_move_and_save(
    game: &mut GameState,
    store: &impl BestScoreStore,
    direction: Direction,
) -> Result<MoveResult> {
    let result = game.apply_move(direction)?;
    if result.new_best {
        store.save_best_score(result.best_score);
    }
    Ok(result)
}

/// Store that keeps the value in memory only
#[derive(Debug, Default)]
pub struct MemoryStore {
    best: Cell<u32>,
    saves: Cell<u32>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            best: Cell::new(best),
            saves: Cell::new(0),
        }
    }

    /// Number of times the value was written
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self) -> u32 {
        self.best.get()
    }

    fn save_best_score(&self, score: u32) {
        self.best.set(score);
        self.saves.set(self.saves.get() + 1);
    }
}
