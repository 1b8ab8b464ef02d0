//! In-memory book store
//!
//! The whole collection sits behind one `RwLock`. Every operation takes the
//! guard once and releases it before returning, so a borrow or return is a
//! single read-modify-write. Reads hand out clones; nothing outside this
//! module holds a reference into the vector.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

/// Sample catalog loaded at startup when seeding is enabled
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new("The Great Gatsby", "F. Scott Fitzgerald", "Fiction"),
        Book::new("1984", "George Orwell", "Dystopian"),
        Book::new("To Kill a Mockingbird", "Harper Lee", "Classic"),
    ]
}

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books
            .read()
            .map_err(|_| AppError::Internal("Book store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books
            .write()
            .map_err(|_| AppError::Internal("Book store lock poisoned".to_string()))
    }

    /// All books in insertion order
    pub fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.read()?.clone())
    }

    /// Books matching every supplied filter
    pub fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        Ok(self
            .read()?
            .iter()
            .filter(|book| book.matches(query))
            .cloned()
            .collect())
    }

    /// Get book by ID
    pub fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.read()?
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub fn count(&self) -> AppResult<usize> {
        Ok(self.read()?.len())
    }

    /// First `limit` books in insertion order
    pub fn first(&self, limit: usize) -> AppResult<Vec<Book>> {
        Ok(self.read()?.iter().take(limit).cloned().collect())
    }

    /// Create a new book. Nothing is stored unless every field is present and
    /// non-blank.
    pub fn create(&self, data: CreateBook) -> AppResult<Book> {
        let data = data.normalized();
        data.validate()?;

        let (Some(title), Some(author), Some(genre)) = (data.title, data.author, data.genre) else {
            return Err(AppError::Validation("title, author and genre are required".to_string()));
        };

        let mut books = self.write()?;
        let mut book = Book::new(title, author, genre);
        // ids stay unique across live records
        while books.iter().any(|b| b.id == book.id) {
            book.id = uuid::Uuid::new_v4().to_string();
        }
        books.push(book.clone());
        Ok(book)
    }

    /// Update the descriptive fields of a book
    pub fn update(&self, id: &str, data: UpdateBook) -> AppResult<Book> {
        let mut books = self.write()?;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let data = data.normalized();
        data.validate()?;
        book.apply(data);
        Ok(book.clone())
    }

    /// Remove a book. Returns false when the id is unknown.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let mut books = self.write()?;
        let before = books.len();
        books.retain(|book| book.id != id);
        Ok(books.len() < before)
    }

    /// Lend a book. `None` when the id is unknown or the book is already out.
    pub fn borrow(
        &self,
        id: &str,
        borrower_id: String,
        due_date: DateTime<Utc>,
    ) -> AppResult<Option<Book>> {
        let mut books = self.write()?;
        let Some(book) = books.iter_mut().find(|b| b.id == id && !b.is_borrowed) else {
            return Ok(None);
        };

        book.lend(borrower_id, due_date);
        Ok(Some(book.clone()))
    }

    /// Take a book back. `None` when the id is unknown or the book is not out.
    pub fn return_book(&self, id: &str) -> AppResult<Option<Book>> {
        let mut books = self.write()?;
        let Some(book) = books.iter_mut().find(|b| b.id == id && b.is_borrowed) else {
            return Ok(None);
        };

        book.release();
        Ok(Some(book.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn seeded() -> BooksRepository {
        BooksRepository::with_books(seed_books())
    }

    fn id_of(repo: &BooksRepository, title: &str) -> String {
        repo.list()
            .unwrap()
            .into_iter()
            .find(|b| b.title == title)
            .map(|b| b.id)
            .unwrap()
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let titles: Vec<_> = seeded().list().unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, ["The Great Gatsby", "1984", "To Kill a Mockingbird"]);
    }

    #[test]
    fn test_find_by_genre_on_seed_catalog() {
        let repo = seeded();
        let found = repo
            .find(&BookQuery {
                genre: Some("Fiction".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "The Great Gatsby");
    }

    #[test]
    fn test_find_without_match_is_empty() {
        let found = seeded()
            .find(&BookQuery {
                title: Some("Gatsby".to_string()),
                author: Some("Orwell".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_create_assigns_fresh_id() {
        let repo = seeded();
        let existing: Vec<_> = repo.list().unwrap().into_iter().map(|b| b.id).collect();

        let book = repo
            .create(CreateBook::new(" Dune ", "Frank Herbert", "Science Fiction"))
            .unwrap();

        assert!(!existing.contains(&book.id));
        assert_eq!(book.title, "Dune");
        assert!(!book.is_borrowed);
        assert!(book.borrower_id.is_none());
        assert!(book.due_date.is_none());
        assert_eq!(repo.count().unwrap(), 4);
        assert_eq!(repo.list().unwrap().last().unwrap(), &book);
    }

    #[test]
    fn test_create_rejects_missing_or_blank_fields() {
        let repo = seeded();

        let blank = repo.create(CreateBook::new("Dune", "", "Science Fiction"));
        assert!(matches!(blank, Err(AppError::Validation(_))));

        let missing = repo.create(CreateBook {
            title: Some("Dune".to_string()),
            author: Some("Frank Herbert".to_string()),
            genre: None,
        });
        assert!(matches!(missing, Err(AppError::Validation(_))));

        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_update_applies_supplied_fields_only() {
        let repo = seeded();
        let id = id_of(&repo, "1984");

        let updated = repo
            .update(
                &id,
                UpdateBook {
                    genre: Some("Political Fiction".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "1984");
        assert_eq!(updated.author, "George Orwell");
        assert_eq!(updated.genre, "Political Fiction");
        assert_eq!(repo.get_by_id(&id).unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let result = seeded().update("missing", UpdateBook::default());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_update_keeps_borrow_state() {
        let repo = seeded();
        let id = id_of(&repo, "1984");
        let due = Utc::now() + Duration::days(14);
        repo.borrow(&id, "reader-1".to_string(), due).unwrap().unwrap();

        let updated = repo
            .update(
                &id,
                UpdateBook {
                    title: Some("Nineteen Eighty-Four".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.is_borrowed);
        assert_eq!(updated.borrower_id.as_deref(), Some("reader-1"));
        assert_eq!(updated.due_date, Some(due));
    }

    #[test]
    fn test_update_rejects_blank_field() {
        let repo = seeded();
        let id = id_of(&repo, "1984");

        let result = repo.update(
            &id,
            UpdateBook {
                author: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(repo.get_by_id(&id).unwrap().author, "George Orwell");
    }

    #[test]
    fn test_delete_twice() {
        let repo = seeded();
        let id = id_of(&repo, "1984");

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
        assert_eq!(repo.count().unwrap(), 2);
        assert!(matches!(repo.get_by_id(&id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_borrow_unknown_and_already_borrowed_look_the_same() {
        let repo = seeded();
        let id = id_of(&repo, "The Great Gatsby");
        let due = Utc::now() + Duration::days(14);

        assert!(repo.borrow(&id, "reader-1".to_string(), due).unwrap().is_some());

        let again = repo.borrow(&id, "reader-2".to_string(), due).unwrap();
        let unknown = repo.borrow("missing", "reader-2".to_string(), due).unwrap();
        assert_eq!(again, unknown);
        assert!(again.is_none());

        // first borrower keeps the book
        assert_eq!(
            repo.get_by_id(&id).unwrap().borrower_id.as_deref(),
            Some("reader-1")
        );
    }

    #[test]
    fn test_return_clears_borrow_state() {
        let repo = seeded();
        let id = id_of(&repo, "The Great Gatsby");
        repo.borrow(&id, "reader-1".to_string(), Utc::now()).unwrap();

        let returned = repo.return_book(&id).unwrap().unwrap();
        assert!(!returned.is_borrowed);
        assert!(returned.borrower_id.is_none());
        assert!(returned.due_date.is_none());
    }

    #[test]
    fn test_return_not_borrowed_or_unknown_is_none() {
        let repo = seeded();
        let id = id_of(&repo, "The Great Gatsby");
        let before = repo.list().unwrap();

        assert!(repo.return_book(&id).unwrap().is_none());
        assert!(repo.return_book("missing").unwrap().is_none());
        assert_eq!(repo.list().unwrap(), before);
    }

    #[test]
    fn test_first_caps_at_catalog_size() {
        let repo = seeded();
        assert_eq!(repo.first(3).unwrap().len(), 3);
        assert_eq!(repo.first(10).unwrap().len(), 3);

        let small = BooksRepository::with_books(seed_books().into_iter().take(2).collect());
        let titles: Vec<_> = small.first(3).unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, ["The Great Gatsby", "1984"]);
    }

    #[test]
    fn test_reads_are_independent_copies() {
        let repo = seeded();
        let mut listed = repo.list().unwrap();
        listed[0].title = "Changed".to_string();
        listed[0].is_borrowed = true;

        let id = listed[0].id.clone();
        let mut fetched = repo.get_by_id(&id).unwrap();
        assert_eq!(fetched.title, "The Great Gatsby");
        assert!(!fetched.is_borrowed);

        fetched.author = "Someone Else".to_string();
        assert_eq!(repo.get_by_id(&id).unwrap().author, "F. Scott Fitzgerald");
    }

    #[test]
    fn test_every_read_returns_a_copy() {
        let repo = seeded();
        let snapshot = repo.list().unwrap();
        let gatsby = snapshot[0].id.clone();
        let orwell = snapshot[1].id.clone();

        let mut found = repo
            .find(&BookQuery {
                genre: Some("Fiction".to_string()),
                ..Default::default()
            })
            .unwrap();
        found[0].genre = "Changed".to_string();

        let mut first = repo.first(3).unwrap();
        first[2].title = "Changed".to_string();

        let mut updated = repo
            .update(
                &orwell,
                UpdateBook {
                    genre: Some("Dystopian".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        updated.author = "Changed".to_string();

        let mut borrowed = repo
            .borrow(&gatsby, "reader-1".to_string(), Utc::now())
            .unwrap()
            .unwrap();
        borrowed.borrower_id = Some("mallory".to_string());
        borrowed.due_date = None;

        let mut returned = repo.return_book(&gatsby).unwrap().unwrap();
        returned.is_borrowed = true;

        let mut created = repo
            .create(CreateBook::new("Dune", "Frank Herbert", "Science Fiction"))
            .unwrap();
        created.title = "Changed".to_string();

        let after = repo.list().unwrap();
        assert_eq!(&after[..3], &snapshot[..]);
        assert_eq!(after[3].title, "Dune");
    }

    #[test]
    fn test_concurrent_borrows_lend_once() {
        let repo = seeded();
        let id = id_of(&repo, "1984");
        let due = Utc::now();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                let id = id.clone();
                std::thread::spawn(move || repo.borrow(&id, format!("reader-{i}"), due).unwrap())
            })
            .collect();

        let lent = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .count();
        assert_eq!(lent, 1);
    }
}
