//! Catalog management service

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    recommendation_count: usize,
}

impl CatalogService {
    pub fn new(repository: Repository, recommendation_count: usize) -> Self {
        Self {
            repository,
            recommendation_count,
        }
    }

    pub fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list()
    }

    /// Search books with filters
    pub fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.find(query)
    }

    pub fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id)
    }

    pub fn count_books(&self) -> AppResult<usize> {
        self.repository.books.count()
    }

    /// Create a new book
    pub fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        let book = self.repository.books.create(data).map_err(|e| {
            tracing::debug!("Catalog create rejected: {}", e);
            e
        })?;
        tracing::info!(book_id = %book.id, title = %book.title, "book added to catalog");
        Ok(book)
    }

    /// Update an existing book
    pub fn update_book(&self, id: &str, data: UpdateBook) -> AppResult<Book> {
        let book = self.repository.books.update(id, data)?;
        tracing::info!(book_id = %book.id, "book updated");
        Ok(book)
    }

    /// Delete a book. Returns false when nothing was removed.
    pub fn delete_book(&self, id: &str) -> AppResult<bool> {
        let removed = self.repository.books.delete(id)?;
        if removed {
            tracing::info!(book_id = %id, "book removed from catalog");
        }
        Ok(removed)
    }

    /// Placeholder policy: the first books in catalog order
    pub fn recommendations(&self) -> AppResult<Vec<Book>> {
        self.repository.books.first(self.recommendation_count)
    }
}
