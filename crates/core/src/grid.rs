//! Grid module - owns the N x N board of tiles
//!
//! Uses flat row-major storage (`y * size + x`).
//! Coordinates: (x, y) where x ranges 0..size (left to right), y ranges
//! 0..size (top to bottom).
//!
//! Out-of-bounds access through `get`/`set`/`clear` is a programming error
//! and panics. Use [`Grid::try_get`] when a coordinate comes from outside.

use crate::error::{EngineError, Result};
use crate::merge::try_merge;
use crate::table::CombinationTable;
use crate::types::Position;

/// A single occupied cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    /// The composite emoji exactly as displayed
    pub value: String,
}

impl Tile {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty `size` x `size` grid
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(EngineError::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "coordinate {} outside {}x{} grid",
            pos,
            self.size,
            self.size
        );
        pos.y * self.size + pos.x
    }

    /// Tile at `pos`, if any
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.cells[self.index(pos)].as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        let idx = self.index(pos);
        self.cells[idx].as_mut()
    }

    /// Checked variant of [`Grid::get`]
    pub fn try_get(&self, pos: Position) -> Result<Option<&Tile>> {
        if !self.contains(pos) {
            return Err(EngineError::InvalidCoordinate {
                x: pos.x,
                y: pos.y,
                size: self.size,
            });
        }
        Ok(self.get(pos))
    }

    /// Place a tile, replacing whatever was there
    pub fn set(&mut self, pos: Position, tile: Tile) {
        let idx = self.index(pos);
        self.cells[idx] = Some(tile);
    }

    /// Empty a cell, returning the tile it held
    pub fn clear(&mut self, pos: Position) -> Option<Tile> {
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Move a tile from one cell to another (the destination is overwritten)
    pub fn relocate(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        if let Some(tile) = self.clear(from) {
            self.set(to, tile);
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty positions in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions().filter(|&p| !self.is_occupied(p)).collect()
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Position::new(x, y)))
    }

    /// Occupied cells in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.positions()
            .filter_map(move |p| self.get(p).map(|tile| (p, tile)))
    }

    /// True when the board is full and no horizontally or vertically
    /// adjacent pair would merge (or annihilate).
    pub fn is_terminal(&self, table: &CombinationTable) -> bool {
        if !self.is_full() {
            return false;
        }
        for pos in self.positions() {
            let Some(tile) = self.get(pos) else {
                return false;
            };
            let right = Position::new(pos.x + 1, pos.y);
            let below = Position::new(pos.x, pos.y + 1);
            for neighbor in [right, below] {
                if !self.contains(neighbor) {
                    continue;
                }
                if let Some(other) = self.get(neighbor) {
                    if try_merge(table, &tile.value, &other.value).is_compatible() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Plain-text picture of the board: one line per row, a space for an
    /// empty cell and the tile's value for an occupied one.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for y in 0..self.size {
            for x in 0..self.size {
                match self.get(Position::new(x, y)) {
                    Some(tile) => out.push_str(&tile.value),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a grid from rows of optional values (test and tooling helper).
    ///
    /// Panics when `rows` is not square.
    pub fn from_rows(rows: &[&[Option<&str>]]) -> Self {
        let size = rows.len();
        assert!(size > 0, "grid needs at least one row");
        assert!(rows.iter().all(|r| r.len() == size), "grid must be square");
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|v| v.map(Tile::new)))
            .collect();
        Self { size, cells }
    }
}
