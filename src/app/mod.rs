//! Application state types and entry glue.
//!
//! Defines enums and structs that model the TUI state, as well as helpers
//! to construct defaults and to run the application loop (re-exported as `run`).
//!
pub mod forms;
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::collections::HashMap;

use crate::api::{self, ApiClient, Author, Book};
use crate::config::Config;

/// Top-level active tab in the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Books,
    Authors,
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    SearchBooks,
    SearchAuthors,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Dark default theme.
    #[allow(dead_code)]
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }
}

/// Modal dialog states for catalog actions.
#[derive(Clone, Debug)]
pub enum ModalState {
    /// Action menu for the selected book: Update / Delete.
    BookActions { selected: usize },
    BookCreate { form: forms::BookCreateForm },
    BookUpdate { book_id: u64, form: forms::BookUpdateForm },
    /// Yes/no gate before DELETE. `selected`: 0 = cancel, 1 = delete.
    BookDeleteConfirm { book_id: u64, selected: usize },
    AuthorCreate { form: forms::AuthorForm },
    Info { message: String },
    Help,
}

pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    /// Full collections as last fetched from the backend.
    pub books_all: Vec<Book>,
    pub authors_all: Vec<Author>,
    /// Derived filtered collections currently rendered.
    pub books: Vec<Book>,
    pub authors: Vec<Author>,
    /// Applied search terms, one per tab. Empty means no filter.
    pub books_term: String,
    pub authors_term: String,
    /// Book -> author name join, rebuilt on every refresh.
    pub author_names: HashMap<u64, String>,
    pub active_tab: ActiveTab,
    /// Absolute indices into the filtered collections.
    pub selected_book_index: usize,
    pub selected_author_index: usize,
    /// Current pages, 1-based, clamped on every recomputation.
    pub books_page: usize,
    pub authors_page: usize,
    pub input_mode: InputMode,
    /// Live edit buffer while in a search mode.
    pub search_query: String,
    pub theme: Theme,
    pub modal: Option<ModalState>,
    /// Set when the last fetch degraded to an empty collection.
    pub error_banner: Option<String>,
    /// Transient status-bar message after a successful mutation.
    pub notice: Option<String>,
    pub loading: bool,
    pub keymap: keymap::Keymap,
}

impl AppState {
    /// Create an `AppState` and fetch both collections from the backend.
    ///
    /// Fetch failures degrade to empty collections plus an error banner;
    /// the list views always render.
    pub fn new(config: Config) -> Self {
        let mut app = Self::with_data(config, Vec::new(), Vec::new());
        app.keymap = keymap::Keymap::load_or_init("keybinds.conf");
        app.refresh_all();
        app
    }

    /// Construct state around pre-fetched collections without touching the
    /// network. Used by `new` and by tests.
    pub fn with_data(config: Config, authors: Vec<Author>, books: Vec<Book>) -> Self {
        let client = ApiClient::new(&config);
        let author_names = api::author_index(&authors);
        Self {
            config,
            client,
            books: books.clone(),
            books_all: books,
            authors: authors.clone(),
            authors_all: authors,
            books_term: String::new(),
            authors_term: String::new(),
            author_names,
            active_tab: ActiveTab::Books,
            selected_book_index: 0,
            selected_author_index: 0,
            books_page: 1,
            authors_page: 1,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme: Theme::mocha(),
            modal: None,
            error_banner: None,
            notice: None,
            loading: false,
            keymap: keymap::Keymap::default(),
        }
    }

    /// Re-fetch both collections, rebuild the author join, and re-derive
    /// the filtered views. The only synchronization mechanism: no local
    /// patching happens after a mutation.
    pub fn refresh_all(&mut self) {
        self.error_banner = None;

        match self.client.list_authors() {
            Ok(authors) => self.authors_all = authors,
            Err(err) => {
                self.authors_all = Vec::new();
                self.error_banner = Some(format!("authors unavailable: {err}"));
            }
        }
        match self.client.list_books() {
            Ok(books) => self.books_all = books,
            Err(err) => {
                self.books_all = Vec::new();
                self.error_banner = Some(format!("books unavailable: {err}"));
            }
        }

        self.author_names = api::author_index(&self.authors_all);
        crate::search::apply_filters(self);

        // Connectivity feedback: only when nothing more specific is showing.
        if self.error_banner.is_none() && self.notice.is_none() {
            self.notice = Some(format!("connected to {}", self.config.base_url));
        }
    }

    /// Resolve a book's author reference for display.
    pub fn author_name(&self, author_id: u64) -> &str {
        self.author_names
            .get(&author_id)
            .map(String::as_str)
            .unwrap_or(api::UNKNOWN_AUTHOR)
    }

    /// The page size for the currently active tab.
    pub fn page_size(&self) -> usize {
        match self.active_tab {
            ActiveTab::Books => self.config.books_page_size,
            ActiveTab::Authors => self.config.authors_page_size,
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
