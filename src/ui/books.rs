use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, ModalState};
use crate::pager;

pub fn render_books_table(f: &mut Frame, area: Rect, app: &AppState) {
    let page_size = app.config.books_page_size;
    let window = pager::page_window(&app.books, app.books_page, page_size);
    let page = pager::clamp_page(app.books_page, pager::total_pages(app.books.len(), page_size));
    let start = (page - 1) * page_size;

    let rows = window.iter().enumerate().map(|(i, b)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_book_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(b.id.to_string()),
            Cell::from(b.title.clone()),
            Cell::from(b.genre.clone().unwrap_or_default()),
            Cell::from(b.published_year.to_string()),
            Cell::from(app.author_name(b.author_id).to_string()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Length(6),
        Constraint::Percentage(30),
    ];

    let header = Row::new(vec!["ID", "TITLE", "GENRE", "YEAR", "AUTHOR"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if app.books_term.is_empty() {
        "Books".to_string()
    } else {
        format!("Books (filter: {})", app.books_term)
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_book_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.books.get(app.selected_book_index) {
        Some(b) => format!(
            "Title: {}\nGenre: {}\nPublished: {}\nAuthor: {}\nId: {}",
            b.title,
            b.genre.clone().unwrap_or_default(),
            b.published_year,
            app.author_name(b.author_id),
            b.id
        ),
        None => String::new(),
    };
    let p = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

pub fn render_book_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    match state {
        ModalState::BookActions { selected } => {
            let rect = crate::ui::components::centered_rect(30, 7, area);
            let options = ["Update", "Delete"];
            let mut text = String::new();
            for (idx, label) in options.iter().enumerate() {
                if idx == *selected {
                    text.push_str(&format!("▶ {}\n", label));
                } else {
                    text.push_str(&format!("  {}\n", label));
                }
            }
            let p = Paragraph::new(text).block(
                Block::default()
                    .title("Actions")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
            f.render_widget(Clear, rect);
            f.render_widget(p, rect);
        }
        ModalState::BookCreate { form } => {
            let rect = crate::ui::components::centered_rect(56, 11, area);
            let author = form
                .author_pos
                .and_then(|pos| app.authors_all.get(pos))
                .map(|a| a.name.as_str())
                .unwrap_or("◀ pick with Left/Right ▶");
            let rows = [
                format!("Title:     {}", form.title),
                format!("Genre:     {}", form.genre),
                format!("Year:      {}", form.year),
                format!("Author:    {}", author),
                "Submit".to_string(),
            ];
            render_form(f, rect, app, "New book", &rows, form.selected, form.error.as_deref());
        }
        ModalState::BookUpdate { form, .. } => {
            let rect = crate::ui::components::centered_rect(56, 10, area);
            let rows = [
                format!("Title:     {}", form.title),
                format!("Genre:     {}", form.genre),
                format!("Year:      {}", form.year),
                "Submit".to_string(),
            ];
            render_form(f, rect, app, "Update book", &rows, form.selected, form.error.as_deref());
        }
        ModalState::BookDeleteConfirm { book_id, selected } => {
            let rect = crate::ui::components::centered_rect(46, 7, area);
            let title = app
                .books_all
                .iter()
                .find(|b| b.id == *book_id)
                .map(|b| b.title.clone())
                .unwrap_or_else(|| format!("book {book_id}"));
            let cancel = if *selected == 0 { "[Cancel]" } else { " Cancel " };
            let delete = if *selected == 1 { "[Delete]" } else { " Delete " };
            let body = format!("Delete '{title}'?\n\n  {cancel}    {delete}");
            let p = Paragraph::new(body).block(
                Block::default()
                    .title("Confirm delete")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
            f.render_widget(Clear, rect);
            f.render_widget(p, rect);
        }
        _ => {}
    }
}

/// Shared form renderer: cursor marker per row plus an error line when the
/// last submit failed.
pub(super) fn render_form(
    f: &mut Frame,
    rect: Rect,
    app: &AppState,
    title: &str,
    rows: &[String],
    selected: usize,
    error: Option<&str>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 2);
    for (idx, row) in rows.iter().enumerate() {
        let marker = if idx == selected { "▶ " } else { "  " };
        lines.push(Line::raw(format!("{marker}{row}")));
    }
    if let Some(err) = error {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(app.theme.error),
        )));
    }
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
