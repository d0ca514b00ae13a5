//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorPayload},
        book::{Book, BookPayload},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get(id).await
    }

    pub async fn create_author(&self, payload: AuthorPayload) -> AppResult<Author> {
        let created = self.repository.authors.create(&payload).await?;
        tracing::info!("Created author {} (id={})", created, created.id);
        Ok(created)
    }

    pub async fn update_author(&self, id: i32, payload: AuthorPayload) -> AppResult<Author> {
        self.repository.authors.update(id, &payload).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.repository.books.get(isbn).await
    }

    /// Create a book with its initial author set. A taken ISBN fails
    /// validation the same way a bad field value does.
    pub async fn create_book(&self, payload: BookPayload) -> AppResult<Book> {
        if self.repository.books.isbn_exists(&payload.isbn).await? {
            return Err(AppError::validation(
                "isbn",
                format!("book with isbn {} already exists", payload.isbn),
            ));
        }

        let created = self.repository.books.create(&payload).await?;
        tracing::info!("Created book {} (isbn={})", created, created.isbn);
        Ok(created)
    }

    /// Full-replace update; the author set becomes exactly payload.author_ids.
    pub async fn update_book(&self, isbn: &str, payload: BookPayload) -> AppResult<Book> {
        if payload.isbn != isbn && self.repository.books.isbn_exists(&payload.isbn).await? {
            return Err(AppError::validation(
                "isbn",
                format!("book with isbn {} already exists", payload.isbn),
            ));
        }

        self.repository.books.update(isbn, &payload).await
    }

    pub async fn delete_book(&self, isbn: &str) -> AppResult<()> {
        self.repository.books.delete(isbn).await?;
        tracing::info!("Deleted book isbn={}", isbn);
        Ok(())
    }
}
