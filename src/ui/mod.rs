pub mod authors;
pub mod books;
pub mod components;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{ActiveTab, AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(root[1]);

    let tabs = match app.active_tab {
        ActiveTab::Books => "[Books]  Authors",
        ActiveTab::Authors => "Books  [Authors]",
    };
    let prompt = match app.input_mode {
        InputMode::Normal | InputMode::Modal => String::new(),
        InputMode::SearchBooks => format!("  Search books: {}", app.search_query),
        InputMode::SearchAuthors => format!("  Search authors: {}", app.search_query),
    };
    let p = Paragraph::new(format!(
        "catalog-admin  {tabs}{prompt}  books:{}  authors:{}  — Tab: switch tab; /: search; n: new; Enter: actions; ?: help; q: quit",
        app.books.len(),
        app.authors.len()
    ))
    .block(
        Block::default()
            .title("catalog-admin")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    match app.active_tab {
        ActiveTab::Books => {
            books::render_books_table(f, body[0], app);
            books::render_book_details(f, body[1], app);
        }
        ActiveTab::Authors => {
            authors::render_authors_table(f, body[0], app);
            authors::render_author_details(f, body[1], app);
        }
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::BookActions { .. }
            | ModalState::BookCreate { .. }
            | ModalState::BookUpdate { .. }
            | ModalState::BookDeleteConfirm { .. } => {
                books::render_book_modal(f, area, app, &state);
            }
            ModalState::AuthorCreate { .. } => {
                authors::render_author_modal(f, area, app, &state);
            }
            ModalState::Info { .. } => {
                components::render_info_modal(f, area, app, &state);
            }
            ModalState::Help => {
                components::render_help_modal(f, area, app);
            }
        }
    }
}
