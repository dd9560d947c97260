//! Modal form drafts and required-field validation.
//!
//! Each form holds the local draft for one entity plus a field cursor and an
//! error line. Validation runs before any network call; a failed submit
//! leaves the form open with the message set.

use crate::api::{Author, AuthorDraft, Book, BookDraft, BookPatch};

/// Draft for creating a book. Field rows: title, genre, published year,
/// author, submit.
#[derive(Clone, Debug, Default)]
pub struct BookCreateForm {
    pub selected: usize,
    pub title: String,
    pub genre: String,
    pub year: String,
    /// Index into the fetched author list; `None` until one is picked.
    pub author_pos: Option<usize>,
    pub error: Option<String>,
}

impl BookCreateForm {
    pub const SUBMIT_ROW: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// The text buffer under the cursor, if the cursor is on a text row.
    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self.selected {
            0 => Some(&mut self.title),
            1 => Some(&mut self.genre),
            2 => Some(&mut self.year),
            _ => None,
        }
    }

    /// Step the author picker by `delta` through `len` authors.
    pub fn cycle_author(&mut self, len: usize, delta: isize) {
        if len == 0 {
            self.author_pos = None;
            return;
        }
        let next = match self.author_pos {
            None => 0,
            Some(pos) => (pos as isize + delta).rem_euclid(len as isize) as usize,
        };
        self.author_pos = Some(next);
    }

    /// Check required fields and build the POST payload.
    ///
    /// Missing fields block submission entirely; no request is issued.
    pub fn validate(&self, authors: &[Author]) -> Result<BookDraft, String> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.year.trim().is_empty() {
            missing.push("published year");
        }
        let author = self.author_pos.and_then(|pos| authors.get(pos));
        if author.is_none() {
            missing.push("author");
        }
        if !missing.is_empty() {
            return Err(format!("missing required: {}", missing.join(", ")));
        }
        let published_year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| "published year must be a number".to_string())?;
        Ok(BookDraft {
            title: self.title.trim().to_string(),
            genre: optional(&self.genre),
            published_year,
            author_id: author.map(|a| a.id).unwrap_or_default(),
        })
    }

    /// Reset the draft after a successful create.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Draft for updating a book. Field rows: title, genre, published year,
/// submit. The author reference is not editable here.
#[derive(Clone, Debug)]
pub struct BookUpdateForm {
    pub selected: usize,
    pub title: String,
    pub genre: String,
    pub year: String,
    pub error: Option<String>,
}

impl BookUpdateForm {
    pub const SUBMIT_ROW: usize = 3;

    /// Seed the draft from the entity being edited.
    pub fn seed(book: &Book) -> Self {
        Self {
            selected: 0,
            title: book.title.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.published_year.to_string(),
            error: None,
        }
    }

    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self.selected {
            0 => Some(&mut self.title),
            1 => Some(&mut self.genre),
            2 => Some(&mut self.year),
            _ => None,
        }
    }

    /// Check required fields and build the PUT payload.
    pub fn validate(&self) -> Result<BookPatch, String> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.year.trim().is_empty() {
            missing.push("published year");
        }
        if !missing.is_empty() {
            return Err(format!("missing required: {}", missing.join(", ")));
        }
        let published_year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| "published year must be a number".to_string())?;
        Ok(BookPatch {
            title: Some(self.title.trim().to_string()),
            genre: optional(&self.genre),
            published_year: Some(published_year),
            author_id: None,
        })
    }
}

/// Draft for creating an author. Field rows: name, birthdate, nationality,
/// submit. All three are required.
#[derive(Clone, Debug, Default)]
pub struct AuthorForm {
    pub selected: usize,
    pub name: String,
    pub birthdate: String,
    pub nationality: String,
    pub error: Option<String>,
}

impl AuthorForm {
    pub const SUBMIT_ROW: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self.selected {
            0 => Some(&mut self.name),
            1 => Some(&mut self.birthdate),
            2 => Some(&mut self.nationality),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<AuthorDraft, String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.birthdate.trim().is_empty() {
            missing.push("birthdate");
        }
        if self.nationality.trim().is_empty() {
            missing.push("nationality");
        }
        if !missing.is_empty() {
            return Err(format!("missing required: {}", missing.join(", ")));
        }
        Ok(AuthorDraft {
            name: self.name.trim().to_string(),
            birthdate: self.birthdate.trim().to_string(),
            nationality: self.nationality.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

fn optional(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors() -> Vec<Author> {
        vec![Author {
            id: 7,
            name: "Frank Herbert".to_string(),
            birthdate: "1920-10-08".to_string(),
            nationality: "American".to_string(),
        }]
    }

    #[test]
    fn create_without_author_is_blocked() {
        let form = BookCreateForm {
            title: "Foo".to_string(),
            year: "1999".to_string(),
            ..BookCreateForm::new()
        };
        let err = form.validate(&authors()).unwrap_err();
        assert!(err.contains("author"));
        assert!(!err.contains("title"));
    }

    #[test]
    fn create_lists_all_missing_fields() {
        let form = BookCreateForm::new();
        let err = form.validate(&authors()).unwrap_err();
        assert!(err.contains("title"));
        assert!(err.contains("published year"));
        assert!(err.contains("author"));
    }

    #[test]
    fn create_with_non_numeric_year_is_blocked() {
        let mut form = BookCreateForm {
            title: "Foo".to_string(),
            year: "MCMXCIX".to_string(),
            ..BookCreateForm::new()
        };
        form.cycle_author(1, 1);
        let err = form.validate(&authors()).unwrap_err();
        assert!(err.contains("number"));
    }

    #[test]
    fn create_builds_draft_with_optional_genre() {
        let mut form = BookCreateForm {
            title: "  Dune ".to_string(),
            year: "1965".to_string(),
            ..BookCreateForm::new()
        };
        form.cycle_author(1, 1);
        let draft = form.validate(&authors()).unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.published_year, 1965);
        assert_eq!(draft.author_id, 7);
        assert!(draft.genre.is_none());
    }

    #[test]
    fn author_cycle_wraps_both_directions() {
        let mut form = BookCreateForm::new();
        form.cycle_author(3, 1);
        assert_eq!(form.author_pos, Some(0));
        form.cycle_author(3, -1);
        assert_eq!(form.author_pos, Some(2));
        form.cycle_author(3, 1);
        assert_eq!(form.author_pos, Some(0));
    }

    #[test]
    fn update_seeds_from_book_and_builds_patch() {
        let book = Book {
            id: 3,
            title: "1984".to_string(),
            genre: Some("Dystopia".to_string()),
            published_year: 1949,
            author_id: 2,
        };
        let form = BookUpdateForm::seed(&book);
        assert_eq!(form.year, "1949");
        let patch = form.validate().unwrap();
        assert_eq!(patch.title.as_deref(), Some("1984"));
        assert_eq!(patch.published_year, Some(1949));
        assert!(patch.author_id.is_none());
    }

    #[test]
    fn update_requires_title() {
        let mut form = BookUpdateForm::seed(&Book {
            id: 3,
            title: "1984".to_string(),
            genre: None,
            published_year: 1949,
            author_id: 2,
        });
        form.title.clear();
        assert!(form.validate().unwrap_err().contains("title"));
    }

    #[test]
    fn author_form_requires_every_field() {
        let form = AuthorForm {
            name: "Ursula K. Le Guin".to_string(),
            ..AuthorForm::new()
        };
        let err = form.validate().unwrap_err();
        assert!(err.contains("birthdate"));
        assert!(err.contains("nationality"));
        assert!(!err.contains("name"));
    }
}
