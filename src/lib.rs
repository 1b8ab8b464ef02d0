//! Bookshelf Library Catalog
//!
//! An in-memory library catalog served as a REST JSON API: list, search, add,
//! update and delete books, borrow and return them, and a small
//! recommendations endpoint.

use std::sync::Arc;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository, clock: Arc<dyn clock::Clock>) -> Self {
        let services = services::Services::new(repository, config.catalog, clock);
        Self {
            services: Arc::new(services),
        }
    }
}
