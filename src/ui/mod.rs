//! TUI module for the problem tracker.

mod app;
pub mod theme;
mod widgets;

pub use app::App;
