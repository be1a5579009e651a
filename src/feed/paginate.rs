//! Fixed-size pagination over the filtered list.
//!
//! Index 0 of the filtered list is the lead story and is never part of a
//! grid page, so page `p` covers indices `(p-1)*PER_PAGE + 1 ..` onward.

/// Cards per grid page.
pub const PER_PAGE: usize = 6;

/// Number of grid pages for a filtered list of `len` articles.
///
/// Always at least 1, even when the list is empty or holds only the lead.
pub fn total_pages(len: usize) -> usize {
    len.saturating_sub(1).div_ceil(PER_PAGE).max(1)
}

/// Index range of the grid window for a 1-based `page`, clipped to `len`.
///
/// The range is empty when the page lies past the end of the list.
pub fn window_range(len: usize, page: usize) -> std::ops::Range<usize> {
    let start = page.max(1).saturating_sub(1).saturating_mul(PER_PAGE).saturating_add(1);
    let end = start.saturating_add(PER_PAGE).min(len);
    if start >= end {
        return 0..0;
    }
    start..end
}

/// Slice of `items` shown on grid page `page`.
pub fn page_window<T>(items: &[T], page: usize) -> &[T] {
    &items[window_range(items.len(), page)]
}
