use crate::types::GAME_SIZE;

/// Plain-data copy of a game, for renderers and tests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub size: usize,
    /// Row-major displayed values
    pub cells: Vec<Option<String>>,
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub started: bool,
    pub finished: bool,
    /// Moves that changed the grid
    pub moves: u32,
    pub seed: u64,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            size: GAME_SIZE,
            cells: vec![None; GAME_SIZE * GAME_SIZE],
            score: 0,
            best_score: 0,
            level: 1,
            started: false,
            finished: false,
            moves: 0,
            seed: 0,
        }
    }
}

impl GameSnapshot {
    /// Value at `(x, y)`; `None` for empty or out-of-range cells
    pub fn cell(&self, x: usize, y: usize) -> Option<&str> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(y * self.size + x)?.as_deref()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn playable(&self) -> bool {
        self.started && !self.finished
    }
}
