//! The book record and its payload validation.
//!
//! Write requests carry `{"book": {...}}`; `validate_book_payload` checks the
//! envelope against the fixed field set and returns either a fully typed
//! [`Book`] or the complete list of field-level errors, so a single response
//! can report every problem at once.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

/// Earliest publication year accepted as plausible.
pub const MIN_YEAR: i32 = 1000;

/// One row of the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Exact-match list filters; every field present narrows the result
/// conjunctively. Unknown query keys are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookFilter {
    pub isbn: Option<String>,
    pub amazon_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub pages: Option<i32>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// A single validation failure, e.g. `book.pages must be a positive integer`.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Validates a write-request body and assembles the [`Book`] it describes.
///
/// All eight fields are required for create and update alike; extra keys
/// inside `book` are ignored. Errors accumulate instead of short-circuiting.
pub fn validate_book_payload(payload: &JsonValue) -> Result<Book, Vec<FieldError>> {
    let Some(book) = payload.get("book").and_then(JsonValue::as_object) else {
        return Err(vec![FieldError::new("book", "is required and must be an object")]);
    };

    let mut errors = Vec::new();

    let isbn = require_string(book, "isbn", &mut errors);
    let amazon_url = require_string(book, "amazon_url", &mut errors);
    let author = require_string(book, "author", &mut errors);
    let language = require_string(book, "language", &mut errors);
    let pages = require_integer(book, "pages", &mut errors);
    let publisher = require_string(book, "publisher", &mut errors);
    let title = require_string(book, "title", &mut errors);
    let year = require_integer(book, "year", &mut errors);

    if let Some(pages) = pages {
        if pages <= 0 {
            errors.push(FieldError::new("book.pages", "must be a positive integer"));
        }
    }
    if let Some(year) = year {
        let max_year = Utc::now().year() + 1;
        if year < MIN_YEAR || year > max_year {
            errors.push(FieldError::new(
                "book.year",
                format!("must be between {} and {}", MIN_YEAR, max_year),
            ));
        }
    }

    match (isbn, amazon_url, author, language, pages, publisher, title, year) {
        (
            Some(isbn),
            Some(amazon_url),
            Some(author),
            Some(language),
            Some(pages),
            Some(publisher),
            Some(title),
            Some(year),
        ) if errors.is_empty() => Ok(Book {
            isbn,
            amazon_url,
            author,
            language,
            pages,
            publisher,
            title,
            year,
        }),
        _ => Err(errors),
    }
}

fn require_string(
    book: &Map<String, JsonValue>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match book.get(key) {
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(format!("book.{}", key), "must be a string"));
            None
        }
        None => {
            errors.push(FieldError::new(format!("book.{}", key), "is required"));
            None
        }
    }
}

fn require_integer(
    book: &Map<String, JsonValue>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    match book.get(key) {
        Some(JsonValue::Number(n)) => {
            if let Some(v) = n.as_i64() {
                match i32::try_from(v) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        errors.push(FieldError::new(format!("book.{}", key), "is out of range"));
                        None
                    }
                }
            } else if n.is_u64() {
                errors.push(FieldError::new(format!("book.{}", key), "is out of range"));
                None
            } else {
                errors.push(FieldError::new(format!("book.{}", key), "must be an integer"));
                None
            }
        }
        Some(_) => {
            errors.push(FieldError::new(format!("book.{}", key), "must be an integer"));
            None
        }
        None => {
            errors.push(FieldError::new(format!("book.{}", key), "is required"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> JsonValue {
        json!({
            "book": {
                "isbn": "0691161518",
                "amazon_url": "http://a.co/eobPtX2",
                "author": "Matthew Lane",
                "language": "english",
                "pages": 264,
                "publisher": "Princeton University Press",
                "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
                "year": 2017
            }
        })
    }

    fn messages(errors: Vec<FieldError>) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn accepts_a_complete_payload() {
        let book = validate_book_payload(&valid_payload()).unwrap();
        assert_eq!(book.isbn, "0691161518");
        assert_eq!(book.pages, 264);
        assert_eq!(book.year, 2017);
    }

    #[test]
    fn rejects_a_missing_book_envelope() {
        let errors = validate_book_payload(&json!({})).unwrap_err();
        assert_eq!(messages(errors), vec!["book is required and must be an object"]);

        let errors = validate_book_payload(&json!({ "book": "not an object" })).unwrap_err();
        assert_eq!(messages(errors), vec!["book is required and must be an object"]);
    }

    #[test]
    fn lists_every_missing_field() {
        let errors = validate_book_payload(&json!({ "book": {} })).unwrap_err();
        let messages = messages(errors);
        assert_eq!(messages.len(), 8);
        assert!(messages.contains(&"book.isbn is required".to_string()));
        assert!(messages.contains(&"book.pages is required".to_string()));
        assert!(messages.contains(&"book.year is required".to_string()));
    }

    #[test]
    fn lists_every_type_mismatch() {
        let mut payload = valid_payload();
        payload["book"]["pages"] = json!("a hundred");
        payload["book"]["title"] = json!(42);
        payload["book"]["year"] = json!(true);

        let messages = messages(validate_book_payload(&payload).unwrap_err());
        assert_eq!(messages.len(), 3);
        assert!(messages.contains(&"book.pages must be an integer".to_string()));
        assert!(messages.contains(&"book.title must be a string".to_string()));
        assert!(messages.contains(&"book.year must be an integer".to_string()));
    }

    #[test]
    fn rejects_non_positive_pages() {
        for pages in [0, -5] {
            let mut payload = valid_payload();
            payload["book"]["pages"] = json!(pages);
            let messages = messages(validate_book_payload(&payload).unwrap_err());
            assert_eq!(messages, vec!["book.pages must be a positive integer"]);
        }
    }

    #[test]
    fn rejects_fractional_pages() {
        let mut payload = valid_payload();
        payload["book"]["pages"] = json!(99.5);
        let messages = messages(validate_book_payload(&payload).unwrap_err());
        assert_eq!(messages, vec!["book.pages must be an integer"]);
    }

    #[test]
    fn rejects_an_implausible_year() {
        let max_year = Utc::now().year() + 1;
        for year in [999, 3000] {
            let mut payload = valid_payload();
            payload["book"]["year"] = json!(year);
            let messages = messages(validate_book_payload(&payload).unwrap_err());
            assert_eq!(
                messages,
                vec![format!("book.year must be between {} and {}", MIN_YEAR, max_year)]
            );
        }

        // Boundary years are plausible.
        for year in [MIN_YEAR, max_year] {
            let mut payload = valid_payload();
            payload["book"]["year"] = json!(year);
            assert!(validate_book_payload(&payload).is_ok());
        }
    }

    #[test]
    fn rejects_integers_beyond_i32() {
        let mut payload = valid_payload();
        payload["book"]["pages"] = json!(3_000_000_000_i64);
        let messages = messages(validate_book_payload(&payload).unwrap_err());
        assert_eq!(messages, vec!["book.pages is out of range"]);
    }

    #[test]
    fn ignores_extra_keys_inside_the_envelope() {
        let mut payload = valid_payload();
        payload["book"]["genre"] = json!("mathematics");
        assert!(validate_book_payload(&payload).is_ok());
    }
}
