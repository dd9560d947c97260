//! Catalog entities and the REST API client.
//!
//! The backend is the sole source of truth: this module only moves JSON in
//! and out of it. All operations share one error contract (`ApiError`);
//! whether a failure degrades to an empty table or keeps a form open is the
//! caller's decision, not the client's.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;

/// Label rendered when a book references an author id that is not in the
/// current author index.
pub const UNKNOWN_AUTHOR: &str = "unknown author";

/// An author record as served by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub birthdate: String,
    pub nationality: String,
}

/// A book record as served by the backend. Wire format is camelCase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub published_year: i32,
    pub author_id: u64,
}

/// Payload for creating an author.
#[derive(Clone, Debug, Serialize)]
pub struct AuthorDraft {
    pub name: String,
    pub birthdate: String,
    pub nationality: String,
}

/// Payload for creating a book.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub published_year: i32,
    pub author_id: u64,
}

/// Partial update for a book. Absent fields are left untouched by the
/// backend, so `None` is omitted from the PUT body entirely.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
}

/// Build the id -> name map used to resolve the Book -> Author join for
/// display. Rebuilt from scratch on every refresh.
pub fn author_index(authors: &[Author]) -> HashMap<u64, String> {
    authors.iter().map(|a| (a.id, a.name.clone())).collect()
}

/// Synchronous client for the catalog REST backend.
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the injected configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured backend root, trailing slash stripped.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /api/authors
    pub fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        self.get_json("/api/authors")
            .inspect_err(|err| tracing::error!(%err, "list authors failed"))
    }

    /// GET /api/books
    pub fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get_json("/api/books")
            .inspect_err(|err| tracing::error!(%err, "list books failed"))
    }

    /// POST /api/authors
    pub fn create_author(&self, draft: &AuthorDraft) -> Result<Author, ApiError> {
        self.post_json("/api/authors", draft)
            .inspect_err(|err| tracing::error!(%err, "create author failed"))
    }

    /// POST /api/books
    pub fn create_book(&self, draft: &BookDraft) -> Result<Book, ApiError> {
        self.post_json("/api/books", draft)
            .inspect_err(|err| tracing::error!(%err, "create book failed"))
    }

    /// PUT /api/books/{id}
    pub fn update_book(&self, id: u64, patch: &BookPatch) -> Result<Book, ApiError> {
        self.put_json(&format!("/api/books/{id}"), patch)
            .inspect_err(|err| tracing::error!(%err, id, "update book failed"))
    }

    /// DELETE /api/books/{id}
    pub fn delete_book(&self, id: u64) -> Result<(), ApiError> {
        tracing::debug!(id, "DELETE /api/books/{{id}}");
        let response = self
            .agent
            .delete(self.endpoint(&format!("/api/books/{id}")))
            .call()?;
        check(response)
            .map(|_| ())
            .inspect_err(|err| tracing::error!(%err, id, "delete book failed"))
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self.agent.get(self.endpoint(path)).call()?;
        decode(check(response)?)
    }

    fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize,
    {
        tracing::debug!(path, "POST");
        let payload = encode(body)?;
        let response = self
            .agent
            .post(self.endpoint(path))
            .content_type("application/json")
            .send(payload.as_bytes())?;
        decode(check(response)?)
    }

    fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize,
    {
        tracing::debug!(path, "PUT");
        let payload = encode(body)?;
        let response = self
            .agent
            .put(self.endpoint(path))
            .content_type("application/json")
            .send(payload.as_bytes())?;
        decode(check(response)?)
    }
}

/// Read the body and map non-2xx statuses to `ApiError::Status`.
///
/// Automatic status-as-error is disabled on the agent so the body of an
/// error response is available for the message.
fn check(mut response: ureq::http::Response<ureq::Body>) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, body });
    }
    Ok(body)
}

fn decode<T: serde::de::DeserializeOwned>(body: String) -> Result<T, ApiError> {
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_uses_camel_case_on_the_wire() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            genre: Some("Sci-Fi".to_string()),
            published_year: 1965,
            author_id: 7,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["publishedYear"], 1965);
        assert_eq!(json["authorId"], 7);
        assert!(json.get("published_year").is_none());
    }

    #[test]
    fn book_decodes_without_genre() {
        let book: Book =
            serde_json::from_str(r#"{"id":2,"title":"1984","publishedYear":1949,"authorId":3}"#)
                .unwrap();
        assert_eq!(book.title, "1984");
        assert!(book.genre.is_none());
    }

    #[test]
    fn book_patch_omits_absent_fields() {
        let patch = BookPatch {
            title: Some("Dune Messiah".to_string()),
            ..BookPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "Dune Messiah");
        assert!(json.get("genre").is_none());
        assert!(json.get("publishedYear").is_none());
        assert!(json.get("authorId").is_none());
    }

    #[test]
    fn author_index_maps_id_to_name() {
        let authors = vec![
            Author {
                id: 1,
                name: "Frank Herbert".to_string(),
                birthdate: "1920-10-08".to_string(),
                nationality: "American".to_string(),
            },
            Author {
                id: 2,
                name: "George Orwell".to_string(),
                birthdate: "1903-06-25".to_string(),
                nationality: "British".to_string(),
            },
        ];
        let index = author_index(&authors);
        assert_eq!(index.get(&1).map(String::as_str), Some("Frank Herbert"));
        assert_eq!(index.get(&2).map(String::as_str), Some("George Orwell"));
        assert!(index.get(&99).is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = Config {
            base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config);
        assert_eq!(client.endpoint("/api/books"), "http://localhost:8080/api/books");
    }
}
