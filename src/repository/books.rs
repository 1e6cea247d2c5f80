//! PostgreSQL book storage

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookChanges, BookPage, BookQuery},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

/// Escape `LIKE` wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, query: &BookQuery) {
    let Some(term) = query.search.as_deref() else {
        return;
    };
    let pattern = format!("%{}%", escape_like(term));

    builder
        .push(" WHERE title LIKE ")
        .push_bind(pattern.clone())
        .push(" OR author LIKE ")
        .push_bind(pattern.clone())
        .push(" OR genre LIKE ")
        .push_bind(pattern.clone())
        .push(" OR CAST(year AS TEXT) LIKE ")
        .push_bind(pattern);
}

fn count_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM books");
    push_filter(&mut builder, query);
    builder
}

fn select_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
    push_filter(&mut builder, query);
    builder.push(" ORDER BY id");
    if let Some(window) = query.window {
        builder
            .push(" LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
    }
    builder
}

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn search(&self, query: &BookQuery) -> AppResult<BookPage> {
        let total: i64 = count_query(query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let books = select_query(query)
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok(BookPage { books, total })
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn insert(&self, changes: &BookChanges) -> AppResult<Book> {
        let now = Utc::now();
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, year, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.genre)
        .bind(changes.year)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: i32, changes: &BookChanges) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = $5
            WHERE id = $6
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.genre)
        .bind(changes.year)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
