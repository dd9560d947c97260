use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{AppState, ModalState};
use crate::pager;

pub fn render_authors_table(f: &mut Frame, area: Rect, app: &AppState) {
    let page_size = app.config.authors_page_size;
    let window = pager::page_window(&app.authors, app.authors_page, page_size);
    let page = pager::clamp_page(
        app.authors_page,
        pager::total_pages(app.authors.len(), page_size),
    );
    let start = (page - 1) * page_size;

    let rows = window.iter().enumerate().map(|(i, a)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_author_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(a.id.to_string()),
            Cell::from(a.name.clone()),
            Cell::from(a.birthdate.clone()),
            Cell::from(a.nationality.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(40),
        Constraint::Length(12),
        Constraint::Percentage(30),
    ];

    let header = Row::new(vec!["ID", "NAME", "BIRTHDATE", "NATIONALITY"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if app.authors_term.is_empty() {
        "Authors".to_string()
    } else {
        format!("Authors (filter: {})", app.authors_term)
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

pub fn render_author_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.authors.get(app.selected_author_index) {
        Some(a) => {
            let book_count = app
                .books_all
                .iter()
                .filter(|b| b.author_id == a.id)
                .count();
            format!(
                "Name: {}\nBirthdate: {}\nNationality: {}\nBooks in catalog: {}\nId: {}",
                a.name, a.birthdate, a.nationality, book_count, a.id
            )
        }
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

pub fn render_author_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::AuthorCreate { form } = state {
        let rect = crate::ui::components::centered_rect(56, 10, area);
        let rows = [
            format!("Name:         {}", form.name),
            format!("Birthdate:    {}", form.birthdate),
            format!("Nationality:  {}", form.nationality),
            "Submit".to_string(),
        ];
        crate::ui::books::render_form(
            f,
            rect,
            app,
            "New author",
            &rows,
            form.selected,
            form.error.as_deref(),
        );
    }
}
