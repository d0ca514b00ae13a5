//! Book model and request payloads
//!
//! A book is identified by its ISBN (no surrogate id) and carries its
//! authors embedded as full representations on reads. Writes take a
//! separate `author_ids` field which fully replaces the author set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;

/// Book read representation with embedded authors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub publication_date: NaiveDate,
    pub authors: Vec<Author>,
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Bare book row, before authors are loaded
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookRow {
    pub isbn: String,
    pub title: String,
    pub publication_date: NaiveDate,
}

impl BookRow {
    pub fn with_authors(self, authors: Vec<Author>) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title,
            publication_date: self.publication_date,
            authors,
        }
    }
}

/// Create/update book request (full replace, every field required).
/// `author_ids` replaces the entire author set; ids must resolve to
/// existing authors.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[validate(length(min = 1, max = 13, message = "must be 1 to 13 characters"))]
    pub isbn: String,
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub title: String,
    pub publication_date: NaiveDate,
    pub author_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(isbn: &str, title: &str) -> BookPayload {
        BookPayload {
            isbn: isbn.to_string(),
            title: title.to_string(),
            publication_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            author_ids: vec![],
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(payload("1234567890123", "Sample Book").validate().is_ok());
    }

    #[test]
    fn rejects_overlong_isbn() {
        let err = payload("12345678901234", "Sample Book")
            .validate()
            .unwrap_err();
        assert!(err.field_errors().contains_key("isbn"));
    }

    #[test]
    fn missing_author_ids_fails_deserialization() {
        // Full-replace semantics: omitting the author set must fail rather
        // than silently wiping it
        let result: Result<BookPayload, _> = serde_json::from_value(serde_json::json!({
            "isbn": "2222222222222",
            "title": "Updated Book",
            "publication_date": "2019-01-01"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn explicit_empty_author_ids_is_accepted() {
        let payload: BookPayload = serde_json::from_value(serde_json::json!({
            "isbn": "1234567890123",
            "title": "Sample Book",
            "publication_date": "2020-01-01",
            "author_ids": []
        }))
        .unwrap();
        assert!(payload.author_ids.is_empty());
    }

    #[test]
    fn missing_title_fails_deserialization() {
        let result: Result<BookPayload, _> = serde_json::from_value(serde_json::json!({
            "isbn": "1234567890123",
            "publication_date": "2020-01-01"
        }));
        assert!(result.is_err());
    }
}
