//! Core model — project data, element declarations and the layout engine.
//!
//! Nothing in this module depends on any terminal or rendering crate.

pub mod element;
pub mod grid;
pub mod layout;
pub mod project;
pub mod render;
pub mod theme;
