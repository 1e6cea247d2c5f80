//! Catalog service for book records

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm, BookPage, BookQuery},
    repository::BookStore,
};

/// Shown when a book id does not exist
pub const BOOK_NOT_FOUND: &str = "Sorry! We couldn't find the book you were looking for.";

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Search books with filter and window
    pub async fn search(&self, query: &BookQuery) -> AppResult<BookPage> {
        self.store.search(query).await
    }

    /// Every book, unpaginated
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.store.search(&BookQuery::all()).await?.books)
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Validate the form and store a new book
    pub async fn create(&self, form: BookForm) -> AppResult<Book> {
        let changes = form.into_changes().map_err(AppError::Validation)?;
        let book = self.store.insert(&changes).await?;
        tracing::info!(id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    /// Validate the form and overwrite an existing book
    pub async fn update(&self, id: i32, form: BookForm) -> AppResult<Book> {
        self.get(id).await?;

        let changes = form.into_changes().map_err(AppError::Validation)?;
        let book = self
            .store
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        tracing::info!(id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
        }
        tracing::info!(id, "Book deleted");
        Ok(())
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
