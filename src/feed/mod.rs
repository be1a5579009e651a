//! Article feed: records, categorization, pagination and state.
//!
//! - [`model`] - API records, categories and the category selector
//! - [`categorize`] - Ordered keyword rules assigning one category per article
//! - [`fetcher`] - Single-request JSON loader for the articles API
//! - [`paginate`] - Fixed-size grid pages that skip the lead story
//! - [`state`] - [`FeedState`], the filter/page state driven by the UI
//!
//! # Example
//!
//! ```ignore
//! use broadsheet::feed::{fetch_articles, CategoryFilter, FeedState};
//!
//! let raw = fetch_articles(&client, "http://localhost:8000/api/articles", 30).await?;
//! let mut state = FeedState::new();
//! state.replace_articles(raw);
//! state.set_filter("tech".parse::<CategoryFilter>()?);
//! ```

mod categorize;
mod fetcher;
mod model;
mod paginate;
mod state;

pub use categorize::categorize;
pub use fetcher::{articles_url, fetch_articles, FetchError, DEFAULT_ARTICLE_LIMIT};
pub use model::{
    Article, CategorizedArticle, Category, CategoryFilter, Published, UnknownCategory,
};
pub use paginate::{page_window, total_pages, window_range, PER_PAGE};
pub use state::{FeedState, RenderScope, LOAD_FAILED_MESSAGE};
