//! Core types module - shared data structures and rule constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal renderer and the input layer alike.
//!
//! # Board
//!
//! - **Size**: 5x5 by default (`GAME_SIZE`), any N >= 1 is accepted by the engine
//! - **Coordinates**: `(x, y)`, x grows left to right, y grows top to bottom
//!
//! # Spawn Table
//!
//! New tiles are drawn from the first `level_cap(level)` entries of
//! [`EMOJI_LIST`]:
//!
//! | Level | Choices | Emoji |
//! |-------|---------|-------|
//! | 1 | 2 | 🫱 🫲 |
//! | 2 | 4 | 🫱 🫲 👨 👩 |
//! | 3 | 6 | 🫱 🫲 👨 👩 🔧 🍳 |
//!
//! # Levels
//!
//! `level = min(score / SCORE_PER_LEVEL + 1, MAX_LEVEL)`
//!
//! | Score | Level |
//! |-------|-------|
//! | 0-15 | 1 |
//! | 16-31 | 2 |
//! | 32+ | 3 |
//!
//! # Skin Tones
//!
//! The five Fitzpatrick modifiers U+1F3FB..U+1F3FF stand for intensities
//! 1..5. A merge that pushes any intensity above [`MAX_INTENSITY`] destroys
//! both tiles instead of producing a new one.
//!
//! # Examples
//!
//! ```
//! use emerji_types::{Direction, Position, GAME_SIZE};
//!
//! assert_eq!(Direction::Left.to_string(), "left");
//! assert_eq!(Direction::ALL.len(), 4);
//!
//! let pos = Position::new(1, 2);
//! assert_eq!(pos.to_string(), "(1, 2)");
//!
//! assert_eq!(GAME_SIZE, 5);
//! ```

use std::fmt;

/// Default board size (5x5)
pub const GAME_SIZE: usize = 5;

/// Ordered spawn list. Lower levels only draw from a prefix of this list.
pub const EMOJI_LIST: [&str; 6] = [
    "\u{1FAF1}", // rightwards hand
    "\u{1FAF2}", // leftwards hand
    "\u{1F468}", // man
    "\u{1F469}", // woman
    "\u{1F527}", // wrench
    "\u{1F373}", // cooking
];

/// Number of spawn choices per level, as `(level, choices)` pairs.
pub const EMOJI_MAX_PER_LEVEL: [(u32, usize); 3] = [(1, 2), (2, 4), (3, 6)];

/// Spawn choices used for a level missing from [`EMOJI_MAX_PER_LEVEL`].
pub const DEFAULT_LEVEL_CAP: usize = 1;

/// Points needed to advance one level
pub const SCORE_PER_LEVEL: u32 = 16;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 3;

/// Highest skin-tone intensity a tile can display
pub const MAX_INTENSITY: u32 = 5;

/// Maximum number of base components accepted in one tile value
pub const MAX_BASE_COMPONENTS: usize = 8;

/// Zero-width joiner
pub const ZWJ: char = '\u{200D}';

/// Lightest Fitzpatrick modifier (type 1-2), intensity 1
pub const SKIN_TONE_FIRST: u32 = 0x1F3FB;

/// Darkest Fitzpatrick modifier (type 6), intensity 5
pub const SKIN_TONE_LAST: u32 = 0x1F3FF;

/// Number of spawn choices at `level`.
///
/// # Examples
///
/// ```
/// use emerji_types::level_cap;
///
/// assert_eq!(level_cap(1), 2);
/// assert_eq!(level_cap(3), 6);
/// assert_eq!(level_cap(9), 1);
/// ```
pub fn level_cap(level: u32) -> usize {
    EMOJI_MAX_PER_LEVEL
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, cap)| *cap)
        .unwrap_or(DEFAULT_LEVEL_CAP)
}

/// Intensity carried by a skin-tone modifier, or `None` for any other char.
pub fn skin_tone_intensity(ch: char) -> Option<u32> {
    let code = ch as u32;
    if (SKIN_TONE_FIRST..=SKIN_TONE_LAST).contains(&code) {
        Some(code - SKIN_TONE_FIRST + 1)
    } else {
        None
    }
}

/// Modifier char for an intensity in `1..=MAX_INTENSITY`.
pub fn skin_tone_modifier(intensity: u32) -> Option<char> {
    if (1..=MAX_INTENSITY).contains(&intensity) {
        char::from_u32(SKIN_TONE_FIRST + intensity - 1)
    } else {
        None
    }
}

/// The four move directions
///
/// Tiles slide toward the wall named by the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in a stable order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One step of a move, in the order it happened
///
/// The engine has already applied every event when `apply_move` returns;
/// presentation layers replay the log to animate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveEvent {
    /// A tile slid into an empty cell
    Slide { from: Position, to: Position },
    /// The tile at `from` slid into `to` and the tile at `to` now shows `value`
    MergeInto {
        from: Position,
        to: Position,
        value: String,
    },
    /// Both tiles were destroyed by tone overflow; `key` is what was scored
    Annihilate {
        first: Position,
        second: Position,
        key: String,
    },
    /// A new tile appeared
    Spawn { at: Position, value: String },
}

/// Player-level actions produced by input collaborators
///
/// Moves go to the engine; the rest are handled by the driving application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward a wall
    Move(Direction),
    /// Throw the current game away and start a new one
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_caps_match_spawn_table() {
        assert_eq!(level_cap(1), 2);
        assert_eq!(level_cap(2), 4);
        assert_eq!(level_cap(3), 6);
        assert_eq!(level_cap(0), DEFAULT_LEVEL_CAP);
        assert!(level_cap(MAX_LEVEL) <= EMOJI_LIST.len());
    }

    #[test]
    fn test_skin_tone_table_is_contiguous() {
        for intensity in 1..=MAX_INTENSITY {
            let ch = skin_tone_modifier(intensity).unwrap();
            assert_eq!(skin_tone_intensity(ch), Some(intensity));
        }
        assert_eq!(skin_tone_modifier(0), None);
        assert_eq!(skin_tone_modifier(MAX_INTENSITY + 1), None);
        assert_eq!(skin_tone_intensity(ZWJ), None);
        assert_eq!(skin_tone_intensity('\u{1F3FA}'), None);
    }
}
