//! Shared UI components (status bar, modal helpers).
//!
//! Contains small building blocks reused by the books/authors screens.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{ActiveTab, AppState, InputMode, ModalState};
use crate::pager;

/// Render the bottom status bar with mode, page position and last outcome.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::SearchBooks => "SEARCH(books)",
        InputMode::SearchAuthors => "SEARCH(authors)",
        InputMode::Modal => "MODAL",
    };
    let (len, page, page_size) = match app.active_tab {
        ActiveTab::Books => (app.books.len(), app.books_page, app.config.books_page_size),
        ActiveTab::Authors => (
            app.authors.len(),
            app.authors_page,
            app.config.authors_page_size,
        ),
    };
    let pages = pager::total_pages(len, page_size).max(1);
    let page = pager::clamp_page(page, pages);

    let mut msg = format!("mode: {mode}  page {page}/{pages}  rows:{len}");
    if app.loading {
        msg.push_str("  loading…");
    }
    if let Some(err) = &app.error_banner {
        msg.push_str(&format!("  ⚠ {err}"));
    } else if let Some(note) = &app.notice {
        msg.push_str(&format!("  ✓ {note}"));
    }

    let style = if app.error_banner.is_some() {
        Style::default().fg(app.theme.error).bg(app.theme.status_bg)
    } else {
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg)
    };
    let p = Paragraph::new(msg).style(style);
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let min_w = 48u16.min(max_w);
        let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(min_w, height, area);
        let p = Paragraph::new(message.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Info")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Render the help modal with key tips.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(50);
    let height = 18u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Help",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    lines.push(Line::from(vec![
        Span::raw("Navigation: "),
        Span::styled("Arrow keys / j k", italic),
        Span::raw("; pages with "),
        Span::styled("h l / PageUp PageDown", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Search: "),
        Span::styled("/", italic),
        Span::raw(" to start; type and Enter to apply; Esc to cancel"),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Switch tab: "),
        Span::styled("Tab", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Refresh from backend: "),
        Span::styled("r", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Quit: "),
        Span::styled("q", italic),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Books tab",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::raw("Open actions (update/delete): "),
        Span::styled("Enter", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Create book: "),
        Span::styled("n", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Delete book: "),
        Span::styled("Delete", italic),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Authors tab",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::raw("Create author: "),
        Span::styled("n", italic),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Close help: "),
        Span::styled("Esc / Enter", italic),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
