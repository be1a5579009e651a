//! Utility functions for common operations.
//!
//! - **Text**: Unicode-aware width calculation, truncation and terminal sanitizing
//! - **Links**: Scheme checks before handing URLs to the system opener

mod links;
mod text;

pub use links::{validate_link, LinkError};
pub use text::{display_width, sanitize_for_terminal, truncate_to_width};
