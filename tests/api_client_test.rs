//! End-to-end tests for the API client against an in-process mock backend.
//!
//! Starts an axum server on a random port mimicking the catalog REST API
//! (camelCase book bodies, server-assigned ids), then exercises every
//! client operation over real HTTP.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tokio::sync::RwLock;

use catalog_admin::ApiError;
use catalog_admin::api::{ApiClient, Author, AuthorDraft, Book, BookDraft, BookPatch};
use catalog_admin::config::Config;

#[derive(Default)]
struct Catalog {
    authors: BTreeMap<u64, Author>,
    books: BTreeMap<u64, Book>,
    next_id: u64,
}

impl Catalog {
    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

type Db = Arc<RwLock<Catalog>>;

fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Catalog::default()));
    Router::new()
        .route("/api/authors", get(list_authors).post(create_author))
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/{id}", axum::routing::put(update_book).delete(delete_book))
        .with_state(db)
}

async fn list_authors(State(db): State<Db>) -> Json<Vec<Author>> {
    Json(db.read().await.authors.values().cloned().collect())
}

async fn create_author(
    State(db): State<Db>,
    Json(input): Json<serde_json::Value>,
) -> (StatusCode, Json<Author>) {
    let mut db = db.write().await;
    let author = Author {
        id: db.fresh_id(),
        name: input["name"].as_str().unwrap_or_default().to_string(),
        birthdate: input["birthdate"].as_str().unwrap_or_default().to_string(),
        nationality: input["nationality"].as_str().unwrap_or_default().to_string(),
    };
    db.authors.insert(author.id, author.clone());
    (StatusCode::CREATED, Json(author))
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    Json(db.read().await.books.values().cloned().collect())
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<serde_json::Value>,
) -> (StatusCode, Json<Book>) {
    let mut db = db.write().await;
    let book = Book {
        id: db.fresh_id(),
        title: input["title"].as_str().unwrap_or_default().to_string(),
        genre: input["genre"].as_str().map(str::to_string),
        published_year: input["publishedYear"].as_i64().unwrap_or_default() as i32,
        author_id: input["authorId"].as_u64().unwrap_or_default(),
    };
    db.books.insert(book.id, book.clone());
    (StatusCode::CREATED, Json(book))
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<serde_json::Value>,
) -> Result<Json<Book>, StatusCode> {
    let mut db = db.write().await;
    let book = db.books.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input["title"].as_str() {
        book.title = title.to_string();
    }
    if let Some(genre) = input["genre"].as_str() {
        book.genre = Some(genre.to_string());
    }
    if let Some(year) = input["publishedYear"].as_i64() {
        book.published_year = year as i32;
    }
    if let Some(author_id) = input["authorId"].as_u64() {
        book.author_id = author_id;
    }
    Ok(Json(book.clone()))
}

async fn delete_book(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut db = db.write().await;
    db.books
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Start the given router on a random port and return a client pointed at it.
fn start_backend(router: Router) -> ApiClient {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    ApiClient::new(&Config {
        base_url: format!("http://{addr}"),
        ..Config::default()
    })
}

#[test]
fn crud_lifecycle() {
    let client = start_backend(app());

    // Both collections start empty.
    assert!(client.list_authors().unwrap().is_empty());
    assert!(client.list_books().unwrap().is_empty());

    // Create an author.
    let author = client
        .create_author(&AuthorDraft {
            name: "Frank Herbert".to_string(),
            birthdate: "1920-10-08".to_string(),
            nationality: "American".to_string(),
        })
        .unwrap();
    assert_eq!(author.name, "Frank Herbert");
    assert_eq!(client.list_authors().unwrap(), vec![author.clone()]);

    // Create a book referencing the author.
    let book = client
        .create_book(&BookDraft {
            title: "Dune".to_string(),
            genre: Some("Sci-Fi".to_string()),
            published_year: 1965,
            author_id: author.id,
        })
        .unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author_id, author.id);

    // Partial update: only the title changes.
    let updated = client
        .update_book(
            book.id,
            &BookPatch {
                title: Some("Dune Messiah".to_string()),
                ..BookPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.published_year, 1965);
    assert_eq!(updated.genre.as_deref(), Some("Sci-Fi"));

    // Delete, then the list is empty again.
    client.delete_book(book.id).unwrap();
    assert!(client.list_books().unwrap().is_empty());

    // Deleting again reports not found.
    let err = client.delete_book(book.id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn server_error_maps_to_status_variant() {
    async fn boom() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "database on fire")
    }
    let router = Router::new().route("/api/books", get(boom));
    let client = start_backend(router);

    let err = client.list_books().unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("database on fire"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(&Config {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout_secs: 2,
        ..Config::default()
    });

    let err = client.list_books().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[test]
fn malformed_body_is_a_decode_error() {
    async fn garbage() -> &'static str {
        "this is not json"
    }
    let router = Router::new().route("/api/authors", get(garbage));
    let client = start_backend(router);

    let err = client.list_authors().unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[test]
fn successful_refresh_reports_connectivity() {
    use catalog_admin::app::AppState;

    let client = start_backend(app());
    client
        .create_author(&AuthorDraft {
            name: "George Orwell".to_string(),
            birthdate: "1903-06-25".to_string(),
            nationality: "British".to_string(),
        })
        .unwrap();

    // start_backend already built a client; rebuild its config for the app
    let config = Config {
        base_url: client.base_url().to_string(),
        ..Config::default()
    };
    let mut app = AppState::with_data(config, Vec::new(), Vec::new());
    app.refresh_all();

    assert_eq!(app.authors.len(), 1);
    assert!(app.error_banner.is_none());
    let notice = app.notice.expect("connectivity notice");
    assert!(notice.contains("connected to"), "got {notice}");
}

#[test]
fn failed_refresh_degrades_to_empty_lists_with_banner() {
    use catalog_admin::app::AppState;

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = Config {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout_secs: 2,
        ..Config::default()
    };
    let mut app = AppState::with_data(
        config,
        vec![Author {
            id: 1,
            name: "stale".to_string(),
            birthdate: String::new(),
            nationality: String::new(),
        }],
        Vec::new(),
    );

    app.refresh_all();

    assert!(app.books.is_empty());
    assert!(app.authors.is_empty());
    assert!(app.error_banner.is_some());
}
