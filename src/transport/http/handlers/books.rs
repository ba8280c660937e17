use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value as JsonValue;

use crate::domain::book::{validate_book_payload, Book, BookFilter};
use crate::transport::http::error::{ApiError, ErrorBody};
use crate::transport::http::types::{
    AppState, BookEnvelope, BookPayload, BooksEnvelope, MessageBody,
};

#[utoipa::path(
    get,
    path = "/books",
    params(BookFilter),
    responses(
        (status = 200, description = "All books matching the filters", body = BooksEnvelope),
        (status = 400, description = "Malformed query parameters", body = ErrorBody)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    filter: Result<Query<BookFilter>, QueryRejection>,
) -> Result<Json<BooksEnvelope>, ApiError> {
    let Query(filter) =
        filter.map_err(|e| ApiError::BadRequest(format!("Invalid query parameters: {}", e)))?;
    let books = state.store.find_all(&filter).await?;
    Ok(Json(BooksEnvelope { books }))
}

#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Primary key of the book")),
    responses(
        (status = 200, description = "The requested book", body = BookEnvelope),
        (status = 404, description = "No book with this isbn", body = ErrorBody)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookEnvelope>, ApiError> {
    let book = state.store.find_one(&isbn).await?;
    Ok(Json(BookEnvelope { book }))
}

#[utoipa::path(
    post,
    path = "/books",
    request_body = BookPayload,
    responses(
        (status = 200, description = "The created book", body = Book),
        (status = 400, description = "Payload failed schema validation", body = ErrorBody)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let book = validate_book_payload(&payload).map_err(ApiError::Validation)?;
    let created = state.store.create(&book).await?;
    Ok(Json(created))
}

#[utoipa::path(
    put,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Primary key of the book to overwrite")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "The updated book", body = Book),
        (status = 400, description = "Payload failed schema validation", body = ErrorBody),
        (status = 404, description = "No book with this isbn", body = ErrorBody)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let book = validate_book_payload(&payload).map_err(ApiError::Validation)?;
    let updated = state.store.update(&isbn, &book).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Primary key of the book to delete")),
    responses(
        (status = 200, description = "Deletion confirmation", body = MessageBody),
        (status = 404, description = "No book with this isbn", body = ErrorBody)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.store.remove(&isbn).await?;
    Ok(Json(MessageBody { message: "Book deleted".to_string() }))
}
