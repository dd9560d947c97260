//! Client-side pagination math.
//!
//! Pure functions of (collection, page, page size). Recomputed on every
//! render; collections are small enough that nothing is cached. Pages are
//! 1-based to match what the status bar shows.

/// Number of pages needed for `len` items: ceil(len / page_size).
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page number into the valid range.
///
/// An empty collection still has a "page 1" so the cursor has somewhere to
/// live; a page past the end lands on the last valid page rather than
/// rendering an empty window.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The contiguous slice of `items` shown for `page`.
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let page = clamp_page(page, total_pages(items.len(), page_size));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    if start >= items.len() {
        return &[];
    }
    &items[start..end]
}

/// Case-insensitive substring match used by the search filters.
pub fn matches_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceil() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
    }

    #[test]
    fn windows_are_contiguous_and_non_overlapping() {
        let items: Vec<u32> = (0..23).collect();
        let page_size = 5;
        let pages = total_pages(items.len(), page_size);
        assert_eq!(pages, 5);

        let mut seen = Vec::new();
        for page in 1..=pages {
            seen.extend_from_slice(page_window(&items, page, page_size));
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn page_past_end_clamps_to_last_valid_page() {
        let items: Vec<u32> = (0..12).collect();
        // 3 pages of 5; page 9 must land on page 3, not an empty window
        let window = page_window(&items, 9, 5);
        assert_eq!(window, &[10, 11]);
        assert_eq!(clamp_page(9, total_pages(items.len(), 5)), 3);
    }

    #[test]
    fn empty_collection_yields_empty_window_on_page_one() {
        let items: Vec<u32> = Vec::new();
        assert_eq!(clamp_page(1, total_pages(0, 5)), 1);
        assert!(page_window(&items, 1, 5).is_empty());
    }

    #[test]
    fn zero_page_size_does_not_panic() {
        let items = [1, 2, 3];
        assert_eq!(page_window(&items, 1, 0), &[1]);
    }

    #[test]
    fn term_matching_is_case_insensitive() {
        assert!(matches_term("Dune", "du"));
        assert!(matches_term("1984", "84"));
        assert!(!matches_term("1984", "du"));
        assert!(matches_term("anything", ""));
    }
}
