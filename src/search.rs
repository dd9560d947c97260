//! Derived list state: search filtering, page clamping, selection snapping.
//!
//! The filtered collections, page numbers, and selections are re-derived
//! from the full collections and applied terms on every change. Nothing in
//! here touches the network.

use crate::app::{AppState, InputMode};
use crate::pager::{clamp_page, matches_term, total_pages};

/// Re-derive both filtered collections from `*_all` and the applied terms,
/// then clamp pages and selections.
///
/// Called after every refresh and every term change. Clamping on every
/// recomputation is what keeps a stale page from outliving a shrunken
/// filtered set.
pub fn apply_filters(app: &mut AppState) {
    app.books = if app.books_term.is_empty() {
        app.books_all.clone()
    } else {
        app.books_all
            .iter()
            .filter(|b| matches_term(&b.title, &app.books_term))
            .cloned()
            .collect()
    };
    app.authors = if app.authors_term.is_empty() {
        app.authors_all.clone()
    } else {
        app.authors_all
            .iter()
            .filter(|a| matches_term(&a.name, &app.authors_term))
            .cloned()
            .collect()
    };

    app.books_page = clamp_page(
        app.books_page,
        total_pages(app.books.len(), app.config.books_page_size),
    );
    app.authors_page = clamp_page(
        app.authors_page,
        total_pages(app.authors.len(), app.config.authors_page_size),
    );

    app.selected_book_index = snap_selection(
        app.selected_book_index,
        app.books.len(),
        app.books_page,
        app.config.books_page_size,
    );
    app.selected_author_index = snap_selection(
        app.selected_author_index,
        app.authors.len(),
        app.authors_page,
        app.config.authors_page_size,
    );
}

/// Apply the live search buffer as the active tab's term.
///
/// A term change always resets that tab's page to 1 before re-deriving.
pub fn commit_search(app: &mut AppState) {
    match app.input_mode {
        InputMode::SearchBooks => {
            app.books_term = app.search_query.clone();
            app.books_page = 1;
            app.selected_book_index = 0;
        }
        InputMode::SearchAuthors => {
            app.authors_term = app.search_query.clone();
            app.authors_page = 1;
            app.selected_author_index = 0;
        }
        InputMode::Normal | InputMode::Modal => {}
    }
    apply_filters(app);
}

/// Keep the selection inside the current page window; snap to the window
/// start if it fell outside.
fn snap_selection(selected: usize, len: usize, page: usize, page_size: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let page_size = page_size.max(1);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(len);
    if selected < start || selected >= end {
        start
    } else {
        selected
    }
}
