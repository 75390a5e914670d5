//! Emerji (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under
//! `emerji::{core,input,term,types}` and adds the pieces only the binary
//! needs: command-line configuration, logger setup, the best-score file and the
//! share text.

pub mod config;
pub mod logging;
pub mod share;
pub mod store;

pub use emerji_core as core;
pub use emerji_input as input;
pub use emerji_term as term;
pub use emerji_types as types;
