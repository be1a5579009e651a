//! Output writers for the edition.
//!
//! - [`html`] - Escaped HTML for the lead, grid and pagination sections
//! - [`export`] - Dated edition files on disk

mod export;
pub mod html;

pub use export::{edition_filename, write_edition, ExportError};
pub use html::{escape_attr, escape_html, render_document, Edition};

use crate::feed::FeedState;
use crate::view::{grid_view, lead_view, pagination_view};

/// Standalone HTML document for the current state of `feed`.
pub fn edition_html(feed: &FeedState, date: &str, dark: bool) -> String {
    let lead = lead_view(feed);
    let grid = grid_view(feed);
    let pagination = pagination_view(feed);
    render_document(&Edition {
        date,
        category: feed.filter().as_str(),
        dark,
        lead: &lead,
        grid: &grid,
        pagination: &pagination,
    })
}
