//! The book store accessor.
//!
//! This module is the intermediary between the HTTP layer and PostgreSQL.
//! It is responsible for:
//! 1.  Bootstrapping the `books` table on startup.
//! 2.  Issuing a single parameterized statement per operation.
//! 3.  Converting zero-row outcomes into `StoreError::NotFound`.

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};
use thiserror::Error;

use crate::domain::book::{Book, BookFilter};
use crate::infra::config;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("There is no book with an isbn '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Owns the connection pool; constructed once at startup and injected into
/// the router state.
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    /// Connects to the mode-selected database and creates the `books` table
    /// if it does not exist yet.
    pub async fn connect() -> Result<Self, anyhow::Error> {
        dotenv::dotenv().ok();
        let database_url = config::database_url();

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                isbn TEXT PRIMARY KEY,
                amazon_url TEXT NOT NULL,
                author TEXT NOT NULL,
                language TEXT NOT NULL,
                pages INTEGER NOT NULL,
                publisher TEXT NOT NULL,
                title TEXT NOT NULL,
                year INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        tracing::info!(mode = ?config::run_mode(), "book store connected");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool. Call once at shutdown (or test teardown).
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Lists books, narrowed by every filter field present (exact match,
    /// conjunctive). Order is natural storage order.
    pub async fn find_all(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        enum Bind<'a> {
            Text(&'a str),
            Int(i32),
        }

        let mut clauses: Vec<(&'static str, Bind)> = Vec::new();
        if let Some(v) = filter.isbn.as_deref() {
            clauses.push(("isbn", Bind::Text(v)));
        }
        if let Some(v) = filter.amazon_url.as_deref() {
            clauses.push(("amazon_url", Bind::Text(v)));
        }
        if let Some(v) = filter.author.as_deref() {
            clauses.push(("author", Bind::Text(v)));
        }
        if let Some(v) = filter.language.as_deref() {
            clauses.push(("language", Bind::Text(v)));
        }
        if let Some(v) = filter.pages {
            clauses.push(("pages", Bind::Int(v)));
        }
        if let Some(v) = filter.publisher.as_deref() {
            clauses.push(("publisher", Bind::Text(v)));
        }
        if let Some(v) = filter.title.as_deref() {
            clauses.push(("title", Bind::Text(v)));
        }
        if let Some(v) = filter.year {
            clauses.push(("year", Bind::Int(v)));
        }

        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year FROM books",
        );
        for (i, (column, value)) in clauses.into_iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(column).push(" = ");
            match value {
                Bind::Text(v) => qb.push_bind(v),
                Bind::Int(v) => qb.push_bind(v),
            };
        }

        let books = qb.build_query_as::<Book>().fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Fetches a single book by primary key.
    pub async fn find_one(&self, isbn: &str) -> Result<Book, StoreError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
             FROM books WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        book.ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    /// Inserts a new book. A duplicate isbn surfaces as the database's
    /// unique-violation error.
    pub async fn create(&self, book: &Book) -> Result<Book, StoreError> {
        let created = sqlx::query_as::<_, Book>(
            "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Fully overwrites the row matched by the path isbn. The body's isbn is
    /// written as-is and may differ from the lookup key.
    pub async fn update(&self, isbn: &str, book: &Book) -> Result<Book, StoreError> {
        let updated = sqlx::query_as::<_, Book>(
            "UPDATE books
             SET isbn = $1, amazon_url = $2, author = $3, language = $4,
                 pages = $5, publisher = $6, title = $7, year = $8
             WHERE isbn = $9
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    /// Deletes the row matched by isbn.
    pub async fn remove(&self, isbn: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(isbn.to_string()));
        }
        Ok(())
    }
}
