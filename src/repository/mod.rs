//! Repository layer holding the in-memory catalog

pub mod books;

/// Main repository struct holding every store
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository preloaded with the sample catalog
    pub fn seeded() -> Self {
        Self {
            books: books::BooksRepository::with_books(books::seed_books()),
        }
    }
}
