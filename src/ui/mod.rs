//! UI / rendering layer — the toolkit seam and its terminal implementation.
//!
//! This layer takes render commands from the core layout engine and turns
//! them into cells on the terminal.

pub mod backend;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod toolkit;
