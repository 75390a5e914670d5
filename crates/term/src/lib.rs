//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget/layout libraries and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw composite emoji as single two-column clusters
//! - Rewrite only the rows that changed since the last input

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use emerji_core as core;
pub use emerji_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{dirty_rows, encode_frame_into, style_spans, StyleSpan, TerminalRenderer};
