//! Data models for Bookshelf

pub mod book;

pub use book::{Book, BookChanges, BookForm, BookPage, BookQuery, ListParams, PAGE_SIZE};
