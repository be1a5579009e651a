//! In-memory feed state: full list, filtered view, and current page.

use super::model::{Article, CategorizedArticle, CategoryFilter};
use super::paginate::{page_window, total_pages};

/// Placeholder shown in place of the grid after a failed load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load articles. Start backend or check network.";

/// Which rendered sections a state change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderScope {
    /// Lead, grid and pagination.
    Full,
    /// Grid and pagination only; the lead section is unchanged.
    GridAndPagination,
}

/// Filter and page state for one generation of loaded articles.
///
/// The filtered list is kept as indices into `articles` so filtering never
/// clones article data and always preserves original relative order.
#[derive(Debug)]
pub struct FeedState {
    articles: Vec<CategorizedArticle>,
    filtered: Vec<usize>,
    filter: CategoryFilter,
    current_page: usize,
    notice: Option<&'static str>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            filtered: Vec::new(),
            filter: CategoryFilter::All,
            current_page: 1,
            notice: None,
        }
    }

    /// Replace the article list wholesale with a freshly fetched batch.
    ///
    /// Every record is categorized here, once. The selector returns to
    /// `all` and the page to 1.
    pub fn replace_articles(&mut self, raw: Vec<Article>) -> RenderScope {
        self.articles = raw.into_iter().map(CategorizedArticle::new).collect();
        self.filter = CategoryFilter::All;
        self.filtered = (0..self.articles.len()).collect();
        self.current_page = 1;
        self.notice = None;
        RenderScope::Full
    }

    /// Record a failed load. Articles, filter and page are left untouched.
    pub fn mark_load_failed(&mut self) {
        self.notice = Some(LOAD_FAILED_MESSAGE);
    }

    /// Apply a category selector and reset to page 1.
    pub fn set_filter(&mut self, filter: CategoryFilter) -> RenderScope {
        self.filter = filter;
        self.filtered = self
            .articles
            .iter()
            .enumerate()
            .filter(|(_, a)| filter.matches(a.category))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
        self.notice = None;
        RenderScope::Full
    }

    /// Select a grid page. Returns `None` when `page` is out of range.
    pub fn select_page(&mut self, page: usize) -> Option<RenderScope> {
        if page < 1 || page > self.total_pages() {
            return None;
        }
        self.current_page = page;
        self.notice = None;
        Some(RenderScope::GridAndPagination)
    }

    pub fn next_page(&mut self) -> Option<RenderScope> {
        self.select_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> Option<RenderScope> {
        self.select_page(self.current_page.saturating_sub(1))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn articles(&self) -> &[CategorizedArticle] {
        &self.articles
    }

    /// Filtered articles in original order.
    pub fn filtered(&self) -> impl ExactSizeIterator<Item = &CategorizedArticle> + '_ {
        self.filtered.iter().map(|&i| &self.articles[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The filtered article at `index`, if any. Index 0 is the lead.
    pub fn filtered_get(&self, index: usize) -> Option<&CategorizedArticle> {
        self.filtered.get(index).map(|&i| &self.articles[i])
    }

    pub fn lead(&self) -> Option<&CategorizedArticle> {
        self.filtered_get(0)
    }

    /// Articles on the current grid page.
    pub fn page_items(&self) -> Vec<&CategorizedArticle> {
        page_window(&self.filtered, self.current_page)
            .iter()
            .map(|&i| &self.articles[i])
            .collect()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len())
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
