//! Terminal front page.
//!
//! - `loop_runner` - main event loop and terminal management
//! - `input` - key dispatch
//! - `events` - background task completions
//! - `render` - page layout
//! - `helpers` - task spawning and browser actions
//! - `masthead`, `lead`, `grid`, `pagination`, `status`, `help` - widgets

mod events;
mod grid;
mod help;
mod helpers;
mod input;
mod lead;
mod loop_runner;
mod masthead;
mod pagination;
mod render;
mod status;

pub use loop_runner::{run, Action};
