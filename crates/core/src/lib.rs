//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole merge engine: value parsing, merge rules,
//! the board, line collapsing, scoring and spawning. It has **no
//! dependencies** on UI, terminal or file I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same game
//! - **Testable**: every rule is a plain function over plain data
//! - **Portable**: the terminal front end is just one possible driver
//!
//! # Module Structure
//!
//! - [`codec`]: emoji string to [`CanonicalValue`] and back
//! - [`table`]: atomic components, recipes and scores
//! - [`merge`]: what two tiles become when pushed together
//! - [`grid`]: N x N board with the terminal-state query
//! - [`collapse`]: the per-line slide and merge procedure
//! - [`scoring`]: points, levels and the best score
//! - [`spawn`]: seeded choice of new tiles
//! - [`game_state`]: one game, from first spawn to game over
//! - [`store`]: best-score persistence contract
//!
//! # Game Rules
//!
//! - Tiles carry composite emoji. Equal non-tool values merge and darken
//!   (skin tone intensity adds up); listed pairs combine into new values
//!   (hands shake, a person picks up a wrench or a frying pan).
//! - Only one merge happens per row or column per move.
//! - A merge that would go darker than the darkest tone destroys both tiles.
//!   The pair still scores.
//! - Every move that changes the board spawns one tile. The game ends when
//!   the board is full and no neighbours can merge.
//!
//! # Example
//!
//! ```
//! use emerji_core::{GameConfig, GameState};
//! use emerji_types::Direction;
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! game.start();
//! assert_eq!(game.grid().occupied(), 1);
//!
//! let result = game.apply_move(Direction::Left).unwrap();
//! assert_eq!(result.score, game.score());
//! assert!(!game.is_finished());
//! ```

pub mod codec;
pub mod collapse;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod merge;
pub mod scoring;
pub mod snapshot;
pub mod spawn;
pub mod store;
pub mod table;

pub use emerji_types as types;

// Re-export commonly used types for convenience
pub use codec::{parse, serialize, CanonicalValue, ValueKey};
pub use collapse::{collapse, Collapse, Line};
pub use error::{EngineError, Result};
pub use game_state::{GameConfig, GameState, MoveResult};
pub use grid::{Grid, Tile};
pub use merge::{try_merge, MergeOutcome};
pub use scoring::{level_for_score, score_for_key, ScoreBoard};
pub use snapshot::GameSnapshot;
pub use spawn::TileSpawner;
pub use store::{apply_move_and_save, BestScoreStore, MemoryStore};
pub use table::{CombinationTable, Recipe};
