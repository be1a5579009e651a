//! Terminal newspaper for a summarized-articles API.
//!
//! Articles are fetched once per load, assigned a category by keyword
//! rules, and laid out as a lead story, a headline list and a paginated
//! card grid. The same view models drive the terminal front page and the
//! exported HTML edition.

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod preferences;
pub mod render;
pub mod share;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
pub mod view;
