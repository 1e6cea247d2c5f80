//! Repository layer for book storage

pub mod books;
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, BookChanges, BookPage, BookQuery},
};

pub use books::PgBookStore;
pub use memory::MemoryBookStore;

/// Storage for book records.
///
/// Lookups by id return `None` for missing rows; callers decide whether that
/// is a 404.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Rows matching the query's filter within its window, plus the total match count
    async fn search(&self, query: &BookQuery) -> AppResult<BookPage>;

    async fn find(&self, id: i32) -> AppResult<Option<Book>>;

    async fn insert(&self, changes: &BookChanges) -> AppResult<Book>;

    async fn update(&self, id: i32, changes: &BookChanges) -> AppResult<Option<Book>>;

    /// Returns `false` when no row had this id
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> AppResult<()>;
}
