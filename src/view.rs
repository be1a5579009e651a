//! View models: pure projections of [`FeedState`] into render-ready data.
//!
//! Nothing here escapes or styles text. The HTML writer escapes, the
//! terminal widgets sanitize, and both consume the same structures.

use chrono::NaiveDate;

use crate::feed::{CategorizedArticle, FeedState};

/// Number of compact headlines listed beside the lead story.
pub const HEADLINE_COUNT: usize = 5;

/// Shown in place of grid cards when the current page has no articles.
pub const EMPTY_GRID_MESSAGE: &str = "No articles in this category/page.";

/// Featured block for the first filtered article.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadStory {
    pub title: String,
    pub image: Option<String>,
    /// Formatted publish timestamp and uppercased category.
    pub meta: String,
    pub summary: String,
    pub link: String,
}

/// Compact entry in the "Other headlines" list.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub title: String,
    pub date: String,
    pub link: String,
}

/// Top-stories section. Both parts are empty when nothing is filtered in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadView {
    pub lead: Option<LeadStory>,
    pub headlines: Vec<Headline>,
}

/// One uniform grid card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub image: Option<String>,
    pub meta: String,
    pub summary: String,
    pub link: String,
}

/// Grid section contents.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    Cards(Vec<CardView>),
    /// The current window is empty.
    Empty(&'static str),
    /// The last load failed; the message replaces the grid.
    Notice(&'static str),
}

/// One control in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub pages: Vec<PageControl>,
}

/// Edition date as shown in the masthead and share text.
pub fn dateline(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Metadata line: `<timestamp> • <CATEGORY>`, or just the category when
/// the article carries no timestamp.
fn meta_line(item: &CategorizedArticle) -> String {
    match &item.article.published {
        Some(p) => {
            let ts = p.format_datetime();
            if ts.is_empty() {
                item.category.label().to_string()
            } else {
                format!("{} • {}", ts, item.category.label())
            }
        }
        None => item.category.label().to_string(),
    }
}

fn card(item: &CategorizedArticle) -> CardView {
    CardView {
        title: item.article.title.clone(),
        image: item.article.image_url().map(str::to_string),
        meta: meta_line(item),
        summary: item.article.summary_text().to_string(),
        link: item.article.link.clone(),
    }
}

/// Lead story plus the next [`HEADLINE_COUNT`] filtered articles.
pub fn lead_view(state: &FeedState) -> LeadView {
    let lead = state.lead().map(|item| LeadStory {
        title: item.article.title.clone(),
        image: item.article.image_url().map(str::to_string),
        meta: meta_line(item),
        summary: item.article.summary_text().to_string(),
        link: item.article.link.clone(),
    });

    let headlines = state
        .filtered()
        .skip(1)
        .take(HEADLINE_COUNT)
        .map(|item| Headline {
            title: item.article.title.clone(),
            date: item
                .article
                .published
                .as_ref()
                .map(|p| p.format_date())
                .unwrap_or_default(),
            link: item.article.link.clone(),
        })
        .collect();

    LeadView { lead, headlines }
}

/// Cards for the current page, or the message that replaces them.
pub fn grid_view(state: &FeedState) -> GridView {
    if let Some(notice) = state.notice() {
        return GridView::Notice(notice);
    }

    let items = state.page_items();
    if items.is_empty() {
        return GridView::Empty(EMPTY_GRID_MESSAGE);
    }
    GridView::Cards(items.into_iter().map(card).collect())
}

/// One control per page, marking the current one.
pub fn pagination_view(state: &FeedState) -> PaginationView {
    let current = state.current_page();
    PaginationView {
        pages: (1..=state.total_pages())
            .map(|number| PageControl {
                number,
                active: number == current,
            })
            .collect(),
    }
}
