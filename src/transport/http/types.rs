use crate::app::book_store::BookStore;
use crate::domain::book::Book;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BookStore>,
}

/// Response envelope for `GET /books`.
#[derive(Serialize, Debug, ToSchema)]
pub struct BooksEnvelope {
    pub books: Vec<Book>,
}

/// Response envelope for `GET /books/:isbn`.
#[derive(Serialize, Debug, ToSchema)]
pub struct BookEnvelope {
    pub book: Book,
}

/// Request body for `POST /books` and `PUT /books/:isbn`.
///
/// Handlers validate the raw JSON themselves (so every field error can be
/// reported at once); this type documents the expected shape.
#[derive(Deserialize, Debug, ToSchema)]
pub struct BookPayload {
    pub book: Book,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageBody {
    pub message: String,
}
