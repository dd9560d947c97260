use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{ActiveTab, AppState, InputMode, ModalState, forms};
use crate::config::Config;
use crate::pager::{clamp_page, total_pages};
use crate::search::commit_search;
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: Config,
) -> Result<()> {
    let mut app = AppState::new(config);

    loop {
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match handle_normal_key(&mut app, &key) {
                Step::Quit => break,
                Step::Refresh => {
                    app.loading = true;
                    terminal.draw(|f| {
                        ui::render(f, &mut app);
                    })?;
                    app.refresh_all();
                    app.loading = false;
                }
                Step::Continue => {}
            },
            InputMode::SearchBooks | InputMode::SearchAuthors => match key.code {
                KeyCode::Enter => {
                    commit_search(&mut app);
                    app.input_mode = InputMode::Normal;
                }
                KeyCode::Esc => {
                    app.input_mode = InputMode::Normal;
                    app.search_query.clear();
                }
                KeyCode::Backspace => {
                    app.search_query.pop();
                }
                KeyCode::Char(c) => {
                    app.search_query.push(c);
                }
                _ => {}
            },
            InputMode::Modal => handle_modal_key(&mut app, key.code),
        }
    }

    Ok(())
}

/// Outcome of a normal-mode key press that the loop itself must act on
/// (quitting, or refreshing with a redraw around the blocking fetch).
enum Step {
    Continue,
    Quit,
    Refresh,
}

fn handle_normal_key(app: &mut AppState, key: &KeyEvent) -> Step {
    // A success notice lives until the next interaction.
    app.notice = None;
    match app.keymap.resolve(key) {
        Some(KeyAction::Quit) => return Step::Quit,
        Some(KeyAction::Refresh) => return Step::Refresh,
        Some(KeyAction::StartSearch) => {
            app.search_query.clear();
            app.input_mode = match app.active_tab {
                ActiveTab::Books => InputMode::SearchBooks,
                ActiveTab::Authors => InputMode::SearchAuthors,
            };
        }
        Some(KeyAction::SwitchTab) => {
            app.active_tab = match app.active_tab {
                ActiveTab::Books => ActiveTab::Authors,
                ActiveTab::Authors => ActiveTab::Books,
            };
        }
        Some(KeyAction::NewEntry) => open_create_modal(app),
        Some(KeyAction::EnterAction) => {
            if app.active_tab == ActiveTab::Books && !app.books.is_empty() {
                app.modal = Some(ModalState::BookActions { selected: 0 });
                app.input_mode = InputMode::Modal;
            }
        }
        Some(KeyAction::DeleteSelection) => {
            if app.active_tab == ActiveTab::Books
                && let Some(book) = app.books.get(app.selected_book_index)
            {
                app.modal = Some(ModalState::BookDeleteConfirm {
                    book_id: book.id,
                    selected: 0,
                });
                app.input_mode = InputMode::Modal;
            }
        }
        Some(KeyAction::OpenHelp) => {
            app.modal = Some(ModalState::Help);
            app.input_mode = InputMode::Modal;
        }
        Some(KeyAction::MoveUp) => move_selection(app, -1),
        Some(KeyAction::MoveDown) => move_selection(app, 1),
        Some(KeyAction::PrevPage) => change_page(app, -1),
        Some(KeyAction::NextPage) => change_page(app, 1),
        Some(KeyAction::Ignore) | None => {}
    }
    Step::Continue
}

/// Move the selection within the active tab's filtered list, flipping the
/// page when the selection crosses a window edge.
fn move_selection(app: &mut AppState, delta: isize) {
    let page_size = app.page_size().max(1);
    match app.active_tab {
        ActiveTab::Books => {
            if app.books.is_empty() {
                return;
            }
            let max = app.books.len() - 1;
            let next = (app.selected_book_index as isize + delta).clamp(0, max as isize) as usize;
            app.selected_book_index = next;
            app.books_page = next / page_size + 1;
        }
        ActiveTab::Authors => {
            if app.authors.is_empty() {
                return;
            }
            let max = app.authors.len() - 1;
            let next = (app.selected_author_index as isize + delta).clamp(0, max as isize) as usize;
            app.selected_author_index = next;
            app.authors_page = next / page_size + 1;
        }
    }
}

/// Step the active tab's page and snap the selection to the window start.
fn change_page(app: &mut AppState, delta: isize) {
    let page_size = app.page_size().max(1);
    match app.active_tab {
        ActiveTab::Books => {
            let pages = total_pages(app.books.len(), page_size);
            let next = clamp_page((app.books_page as isize + delta).max(1) as usize, pages);
            app.books_page = next;
            app.selected_book_index = ((next - 1) * page_size).min(app.books.len().saturating_sub(1));
        }
        ActiveTab::Authors => {
            let pages = total_pages(app.authors.len(), page_size);
            let next = clamp_page((app.authors_page as isize + delta).max(1) as usize, pages);
            app.authors_page = next;
            app.selected_author_index =
                ((next - 1) * page_size).min(app.authors.len().saturating_sub(1));
        }
    }
}

fn open_create_modal(app: &mut AppState) {
    match app.active_tab {
        ActiveTab::Books => {
            if app.authors_all.is_empty() {
                app.modal = Some(ModalState::Info {
                    message: "No authors available. Create an author first (Authors tab, 'n')."
                        .to_string(),
                });
            } else {
                app.modal = Some(ModalState::BookCreate {
                    form: forms::BookCreateForm::new(),
                });
            }
        }
        ActiveTab::Authors => {
            app.modal = Some(ModalState::AuthorCreate {
                form: forms::AuthorForm::new(),
            });
        }
    }
    app.input_mode = InputMode::Modal;
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    let authors_len = app.authors_all.len();
    match &mut app.modal {
        Some(ModalState::BookActions { selected }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Up | KeyCode::Char('k') => {
                if *selected > 0 {
                    *selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if *selected < 1 {
                    *selected += 1;
                }
            }
            KeyCode::Enter => {
                let choice = *selected;
                if let Some(book) = app.books.get(app.selected_book_index).cloned() {
                    match choice {
                        0 => {
                            app.modal = Some(ModalState::BookUpdate {
                                book_id: book.id,
                                form: forms::BookUpdateForm::seed(&book),
                            });
                        }
                        1 => {
                            app.modal = Some(ModalState::BookDeleteConfirm {
                                book_id: book.id,
                                selected: 0,
                            });
                        }
                        _ => {}
                    }
                } else {
                    close_modal(app);
                }
            }
            _ => {}
        },
        Some(ModalState::BookCreate { form }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Up => {
                if form.selected > 0 {
                    form.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if form.selected < forms::BookCreateForm::SUBMIT_ROW {
                    form.selected += 1;
                }
            }
            KeyCode::Left if form.selected == 3 => form.cycle_author(authors_len, -1),
            KeyCode::Right if form.selected == 3 => form.cycle_author(authors_len, 1),
            KeyCode::Enter => {
                if form.selected == forms::BookCreateForm::SUBMIT_ROW {
                    submit_book_create(app);
                } else {
                    form.selected += 1;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.field_mut() {
                    field.push(c);
                } else if form.selected == 3 && c == ' ' {
                    form.cycle_author(authors_len, 1);
                }
            }
            _ => {}
        },
        Some(ModalState::BookUpdate { form, .. }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Up => {
                if form.selected > 0 {
                    form.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if form.selected < forms::BookUpdateForm::SUBMIT_ROW {
                    form.selected += 1;
                }
            }
            KeyCode::Enter => {
                if form.selected == forms::BookUpdateForm::SUBMIT_ROW {
                    submit_book_update(app);
                } else {
                    form.selected += 1;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        },
        Some(ModalState::BookDeleteConfirm { selected, .. }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => *selected = 0,
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                *selected = 1
            }
            KeyCode::Enter => {
                if *selected == 1 {
                    submit_book_delete(app);
                } else {
                    close_modal(app);
                }
            }
            _ => {}
        },
        Some(ModalState::AuthorCreate { form }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Up => {
                if form.selected > 0 {
                    form.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if form.selected < forms::AuthorForm::SUBMIT_ROW {
                    form.selected += 1;
                }
            }
            KeyCode::Enter => {
                if form.selected == forms::AuthorForm::SUBMIT_ROW {
                    submit_author_create(app);
                } else {
                    form.selected += 1;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        },
        Some(ModalState::Info { .. }) | Some(ModalState::Help) => match code {
            KeyCode::Esc | KeyCode::Enter => close_modal(app),
            _ => {}
        },
        None => {
            app.input_mode = InputMode::Normal;
        }
    }
}

/// Validate the create draft and POST it. Validation failures never issue
/// a request; write failures leave the form open for retry.
fn submit_book_create(app: &mut AppState) {
    let Some(ModalState::BookCreate { form }) = &mut app.modal else {
        return;
    };
    let draft = match form.validate(&app.authors_all) {
        Ok(draft) => draft,
        Err(msg) => {
            form.error = Some(msg);
            return;
        }
    };
    match app.client.create_book(&draft) {
        Ok(book) => {
            form.clear();
            app.notice = Some(format!("created \"{}\" (id {})", book.title, book.id));
            close_modal(app);
            app.refresh_all();
        }
        Err(err) => form.error = Some(err.to_string()),
    }
}

fn submit_book_update(app: &mut AppState) {
    let Some(ModalState::BookUpdate { book_id, form }) = &mut app.modal else {
        return;
    };
    let id = *book_id;
    let patch = match form.validate() {
        Ok(patch) => patch,
        Err(msg) => {
            form.error = Some(msg);
            return;
        }
    };
    match app.client.update_book(id, &patch) {
        Ok(book) => {
            app.notice = Some(format!("updated \"{}\"", book.title));
            close_modal(app);
            app.refresh_all();
        }
        Err(err) => form.error = Some(err.to_string()),
    }
}

fn submit_book_delete(app: &mut AppState) {
    let Some(ModalState::BookDeleteConfirm { book_id, .. }) = &app.modal else {
        return;
    };
    let id = *book_id;
    match app.client.delete_book(id) {
        Ok(()) => {
            app.notice = Some(format!("deleted book {id}"));
            close_modal(app);
            app.refresh_all();
        }
        Err(err) => {
            app.modal = Some(ModalState::Info {
                message: format!("delete failed: {err}"),
            });
        }
    }
}

fn submit_author_create(app: &mut AppState) {
    let Some(ModalState::AuthorCreate { form }) = &mut app.modal else {
        return;
    };
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(msg) => {
            form.error = Some(msg);
            return;
        }
    };
    match app.client.create_author(&draft) {
        Ok(author) => {
            form.clear();
            app.notice = Some(format!("created author \"{}\" (id {})", author.name, author.id));
            close_modal(app);
            app.refresh_all();
        }
        Err(err) => form.error = Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Author;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;

    /// A base URL nothing listens on, so every write fails at transport.
    fn dead_config() -> Config {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        Config {
            base_url: format!("http://127.0.0.1:{port}"),
            timeout_secs: 1,
            ..Config::default()
        }
    }

    fn app_with_author() -> AppState {
        AppState::with_data(
            dead_config(),
            vec![Author {
                id: 1,
                name: "Frank Herbert".to_string(),
                birthdate: "1920-10-08".to_string(),
                nationality: "American".to_string(),
            }],
            Vec::new(),
        )
    }

    #[test]
    fn failed_create_keeps_form_open_for_retry() {
        let mut app = app_with_author();
        let mut form = forms::BookCreateForm::new();
        form.title = "Dune".to_string();
        form.year = "1965".to_string();
        form.cycle_author(1, 1);
        form.selected = forms::BookCreateForm::SUBMIT_ROW;
        app.modal = Some(ModalState::BookCreate { form });
        app.input_mode = InputMode::Modal;

        handle_modal_key(&mut app, KeyCode::Enter);

        match &app.modal {
            Some(ModalState::BookCreate { form }) => {
                assert!(form.error.is_some());
                // the draft survives for retry
                assert_eq!(form.title, "Dune");
            }
            other => panic!("form closed on failed write: {other:?}"),
        }
        assert_eq!(app.input_mode, InputMode::Modal);
    }

    #[test]
    fn failed_update_keeps_form_open_for_retry() {
        let mut app = app_with_author();
        let mut form = forms::BookUpdateForm::seed(&crate::api::Book {
            id: 9,
            title: "Dune".to_string(),
            genre: None,
            published_year: 1965,
            author_id: 1,
        });
        form.selected = forms::BookUpdateForm::SUBMIT_ROW;
        app.modal = Some(ModalState::BookUpdate { book_id: 9, form });
        app.input_mode = InputMode::Modal;

        handle_modal_key(&mut app, KeyCode::Enter);

        match &app.modal {
            Some(ModalState::BookUpdate { form, .. }) => assert!(form.error.is_some()),
            other => panic!("form closed on failed write: {other:?}"),
        }
    }

    #[test]
    fn invalid_draft_is_blocked_before_any_request() {
        let mut app = app_with_author();
        let mut form = forms::BookCreateForm::new();
        form.selected = forms::BookCreateForm::SUBMIT_ROW;
        app.modal = Some(ModalState::BookCreate { form });
        app.input_mode = InputMode::Modal;

        handle_modal_key(&mut app, KeyCode::Enter);

        // the error is the validation message, not a transport failure:
        // nothing was sent to the (unreachable) backend
        match &app.modal {
            Some(ModalState::BookCreate { form }) => {
                let err = form.error.as_deref().unwrap();
                assert!(err.contains("missing required"), "got {err}");
            }
            other => panic!("form closed on invalid draft: {other:?}"),
        }
    }

    #[test]
    fn failed_delete_surfaces_info_modal() {
        let mut app = app_with_author();
        app.modal = Some(ModalState::BookDeleteConfirm {
            book_id: 9,
            selected: 1,
        });
        app.input_mode = InputMode::Modal;

        handle_modal_key(&mut app, KeyCode::Enter);

        match &app.modal {
            Some(ModalState::Info { message }) => {
                assert!(message.contains("delete failed"), "got {message}");
            }
            other => panic!("expected info modal, got {other:?}"),
        }
    }

    #[test]
    fn notice_clears_on_next_normal_key() {
        let mut app = app_with_author();
        app.notice = Some("created \"Dune\" (id 1)".to_string());

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(handle_normal_key(&mut app, &key), Step::Continue));
        assert!(app.notice.is_none());
    }
}
