//! Books repository for database operations.
//!
//! The author set of a book lives in the book_authors junction table and is
//! replaced wholesale on every write (delete-then-insert), inside the same
//! transaction as the book row itself so readers never see a partial set.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookPayload, BookRow},
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books with their authors embedded
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT isbn, title, publication_date FROM books ORDER BY isbn",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            let authors = self.get_book_authors(&row.isbn).await?;
            books.push(row.with_authors(authors));
        }

        Ok(books)
    }

    /// Get a book by ISBN with its authors embedded
    pub async fn get(&self, isbn: &str) -> AppResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT isbn, title, publication_date FROM books WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with isbn {} not found", isbn)))?;

        let authors = self.get_book_authors(&row.isbn).await?;
        Ok(row.with_authors(authors))
    }

    /// Load all authors for a book via the book_authors junction table
    async fn get_book_authors(&self, isbn: &str) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.first_name, a.last_name, a.birth_date
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_isbn = $1
            ORDER BY ba.position
            "#,
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Check if an ISBN is already taken
    pub async fn isbn_exists(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create a new book with its initial author set
    pub async fn create(&self, payload: &BookPayload) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        check_author_ids(&mut *tx, &payload.author_ids).await?;

        sqlx::query(
            r#"
            INSERT INTO books (isbn, title, publication_date)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&payload.isbn)
        .bind(&payload.title)
        .bind(payload.publication_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| isbn_taken_error(e, &payload.isbn))?;

        sync_book_authors(&mut *tx, &payload.isbn, &payload.author_ids).await?;

        tx.commit().await?;

        self.get(&payload.isbn).await
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Update a book (full replace). The author set is replaced entirely
    /// with the given ids, never merged.
    pub async fn update(&self, isbn: &str, payload: &BookPayload) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        check_author_ids(&mut *tx, &payload.author_ids).await?;

        // Junction rows follow a renamed ISBN via ON UPDATE CASCADE
        let result = sqlx::query(
            r#"
            UPDATE books
            SET isbn = $1, title = $2, publication_date = $3
            WHERE isbn = $4
            "#,
        )
        .bind(&payload.isbn)
        .bind(&payload.title)
        .bind(payload.publication_date)
        .bind(isbn)
        .execute(&mut *tx)
        .await
        .map_err(|e| isbn_taken_error(e, &payload.isbn))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book with isbn {} not found",
                isbn
            )));
        }

        sync_book_authors(&mut *tx, &payload.isbn, &payload.author_ids).await?;

        tx.commit().await?;

        self.get(&payload.isbn).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book. Junction rows cascade away; authors are left intact.
    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book with isbn {} not found",
                isbn
            )));
        }

        Ok(())
    }
}

/// Map a unique violation on the isbn key to the same validation error the
/// service pre-check produces; covers a concurrent create racing past that
/// check.
fn isbn_taken_error(e: sqlx::Error, isbn: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::validation(
            "isbn",
            format!("book with isbn {} already exists", isbn),
        ),
        _ => AppError::Database(e),
    }
}

/// Verify every id resolves to an existing author; unresolvable ids fail
/// validation naming the author_ids field.
async fn check_author_ids(conn: &mut PgConnection, author_ids: &[i32]) -> AppResult<()> {
    if author_ids.is_empty() {
        return Ok(());
    }

    let found: Vec<i32> = sqlx::query_scalar("SELECT id FROM authors WHERE id = ANY($1)")
        .bind(author_ids)
        .fetch_all(&mut *conn)
        .await?;

    let missing: Vec<i32> = author_ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();

    if !missing.is_empty() {
        return Err(AppError::validation(
            "author_ids",
            format!("authors not found: {:?}", missing),
        ));
    }

    Ok(())
}

/// Replace all authors for a book: delete existing junction rows then
/// insert the new set, preserving payload order via position.
async fn sync_book_authors(
    conn: &mut PgConnection,
    isbn: &str,
    author_ids: &[i32],
) -> AppResult<()> {
    sqlx::query("DELETE FROM book_authors WHERE book_isbn = $1")
        .bind(isbn)
        .execute(&mut *conn)
        .await?;

    for (idx, author_id) in author_ids.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO book_authors (book_isbn, author_id, position)
            VALUES ($1, $2, $3)
            ON CONFLICT (book_isbn, author_id) DO UPDATE SET position = $3
            "#,
        )
        .bind(isbn)
        .bind(author_id)
        .bind((idx + 1) as i16)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
