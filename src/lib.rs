//! Bookshelf Library Catalog
//!
//! A small server-rendered catalog for listing, searching, creating,
//! editing and deleting book records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod templates;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::BookStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn BookStore>) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(store)),
        }
    }
}
