//! Integration with the desktop outside the terminal.

pub mod browser;
