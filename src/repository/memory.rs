//! In-process book storage, used when no database is configured

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookChanges, BookPage, BookQuery},
};

#[derive(Default)]
struct Table {
    rows: Vec<Book>,
    last_id: i32,
}

/// Books kept in a vector ordered by id
#[derive(Default)]
pub struct MemoryBookStore {
    table: RwLock<Table>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn search(&self, query: &BookQuery) -> AppResult<BookPage> {
        let table = self.table.read().await;
        let matching = table.rows.iter().filter(|b| query.matches(b));

        let total = matching.clone().count() as i64;
        let books = match query.window {
            Some(window) => matching
                .skip(window.offset.max(0) as usize)
                .take(window.limit.max(0) as usize)
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };

        Ok(BookPage { books, total })
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, changes: &BookChanges) -> AppResult<Book> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let book = Book {
            id: table.last_id,
            title: changes.title.clone(),
            author: changes.author.clone(),
            genre: changes.genre.clone(),
            year: changes.year,
            created_at: Some(now),
            updated_at: Some(now),
        };
        table.rows.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, changes: &BookChanges) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        let Some(book) = table.rows.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        changes.apply_to(book);
        book.updated_at = Some(Utc::now());
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|b| b.id != id);
        Ok(table.rows.len() != before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
