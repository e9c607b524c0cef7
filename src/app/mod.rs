//! Application orchestration — page content, lifecycle and input handling.

pub mod event;
pub mod handler;
pub mod lifecycle;
pub mod page;
pub mod state;
