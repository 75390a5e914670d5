//! Game state module - owns one game from first spawn to game over
//!
//! This module ties together all core components: grid, combination table,
//! spawner and score board. Every call runs to completion before returning:
//! the grid already shows the post-move board, and the returned event log is
//! only for presentation.

use log::{debug, info};

use crate::collapse::collapse;
use crate::error::{EngineError, Result};
use crate::grid::{Grid, Tile};
use crate::scoring::ScoreBoard;
use crate::snapshot::GameSnapshot;
use crate::spawn::TileSpawner;
use crate::table::CombinationTable;
use crate::types::{Direction, MoveEvent, GAME_SIZE};

/// Parameters for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board edge length
    pub size: usize,
    /// Spawn RNG seed
    pub seed: u64,
    /// Best score loaded from persistence
    pub best_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: GAME_SIZE,
            seed: 1,
            best_score: 0,
        }
    }
}

/// Outcome of [`GameState::apply_move`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// Whether the grid changed (and therefore a tile spawned)
    pub moved: bool,
    /// Everything that happened, in order, including the spawn
    pub events: Vec<MoveEvent>,
    pub finished: bool,
    pub score: u32,
    pub level: u32,
    pub best_score: u32,
    /// The best score was raised by this move and should be persisted
    pub new_best: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    table: CombinationTable,
    spawner: TileSpawner,
    scores: ScoreBoard,
    started: bool,
    finished: bool,
    /// Moves that changed the grid
    moves: u32,
}

impl GameState {
    /// Create a game with an empty grid. Call [`GameState::start`] to place
    /// the first tile.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_table(config, CombinationTable::standard())
    }

    pub fn with_table(config: GameConfig, table: CombinationTable) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(config.size)?,
            table,
            spawner: TileSpawner::new(config.seed),
            scores: ScoreBoard::new(config.best_score),
            started: false,
            finished: false,
            moves: 0,
        })
    }

    /// Start the game and spawn the first tile.
    ///
    /// A board that is already terminal after the first spawn (a 1x1 board)
    /// finishes immediately.
    pub fn start(&mut self) -> Option<MoveEvent> {
        if self.started {
            return None;
        }
        self.started = true;
        let event = self.spawn_random_tile().ok();
        self.finish_if_terminal();
        event
    }

    /// Throw the board away and start over, keeping the best score.
    ///
    /// The spawner keeps its stream, so a restarted game differs from the
    /// first one while staying reproducible from the original seed.
    pub fn restart(&mut self) -> Option<MoveEvent> {
        debug!("restart after {} moves, score {}", self.moves, self.scores.score());
        self.grid.reset();
        self.scores = ScoreBoard::new(self.scores.best());
        self.started = false;
        self.finished = false;
        self.moves = 0;
        self.start()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for tools and tests that stage a position
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn table(&self) -> &CombinationTable {
        &self.table
    }

    /// Text picture of the board, see [`Grid::to_text`]
    pub fn board_text(&self) -> String {
        self.grid.to_text()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.size = self.grid.size();
        out.cells.clear();
        out.cells.extend(
            self.grid
                .positions()
                .map(|p| self.grid.get(p).map(|t| t.value.clone())),
        );
        out.score = self.scores.score();
        out.best_score = self.scores.best();
        out.level = self.scores.level();
        out.started = self.started;
        out.finished = self.finished;
        out.moves = self.moves;
        out.seed = self.spawner.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place a random value from the current level's spawn table on a
    /// random empty cell.
    pub fn spawn_random_tile(&mut self) -> Result<MoveEvent> {
        let at = self
            .spawner
            .pick_cell(&self.grid)
            .ok_or(EngineError::NoEmptyCellForSpawn)?;
        let value = self.spawner.pick_value(self.scores.level());
        self.grid.set(at, Tile::new(value));
        debug!("spawn {} at {}", value, at);
        Ok(MoveEvent::Spawn {
            at,
            value: value.to_string(),
        })
    }

    /// Slide every tile toward `direction`, merging where allowed.
    ///
    /// When anything changed, a tile is spawned and the terminal check runs.
    /// A finished game accepts no more moves: the result is `moved = false`
    /// with `finished = true`.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveResult> {
        if !self.started {
            return Err(EngineError::UninitializedGame);
        }
        if self.finished {
            return Ok(self.result(false, Vec::new(), false));
        }

        let outcome = collapse(&mut self.grid, &self.table, direction);
        if !outcome.changed {
            debug!("move {}: nothing to do", direction);
            return Ok(self.result(false, Vec::new(), false));
        }

        let new_best = self.scores.award(outcome.points);
        self.moves += 1;
        let mut events = outcome.events;
        debug!(
            "move {}: {} events, +{} points, score {}",
            direction,
            events.len(),
            outcome.points,
            self.scores.score()
        );

        match self.spawn_random_tile() {
            Ok(event) => events.push(event),
            Err(EngineError::NoEmptyCellForSpawn) => {}
            Err(err) => return Err(err),
        }

        self.finish_if_terminal();
        if new_best {
            info!("new best score {}", self.scores.best());
        }

        Ok(self.result(true, events, new_best))
    }

    fn finish_if_terminal(&mut self) {
        if self.grid.is_terminal(&self.table) {
            self.finished = true;
            info!(
                "game over after {} moves with score {}",
                self.moves,
                self.scores.score()
            );
        }
    }

    fn result(&self, moved: bool, events: Vec<MoveEvent>, new_best: bool) -> MoveResult {
        MoveResult {
            moved,
            events,
            finished: self.finished,
            score: self.scores.score(),
            level: self.scores.level(),
            best_score: self.scores.best(),
            new_best,
        }
    }
}
