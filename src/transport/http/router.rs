use crate::domain::book::Book;
use crate::transport::http::error::{ErrorBody, ErrorDetail, ErrorMessage};
use crate::transport::http::handlers::{books, health};
use crate::transport::http::types::{
    AppState, BookEnvelope, BookPayload, BooksEnvelope, MessageBody,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book
    ),
    components(schemas(
        Book,
        BookPayload,
        BooksEnvelope,
        BookEnvelope,
        MessageBody,
        ErrorBody,
        ErrorDetail,
        ErrorMessage
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:isbn",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(app_state)
}
