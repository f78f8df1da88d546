//! Pure pagination math for splitting a list into pages.

/// Compute the number of pages for a paginated list.
///
/// An empty list still renders as a single (empty) page.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// Return start/end indices for the zero-based page `page_index`.
pub fn page_window(total_items: usize, per_page: usize, page_index: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page_index.saturating_mul(safe_per_page).min(total_items);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start, end)
}

/// Split `items` into consecutive pages of at most `per_page` entries.
pub fn chunk_pages<T>(items: &[T], per_page: usize) -> Vec<&[T]> {
    (0..total_pages(items.len(), per_page))
        .map(|page_index| {
            let (start, end) = page_window(items.len(), per_page, page_index);
            &items[start..end]
        })
        .collect()
}
