//! Book (catalog entry) model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Catalog entry with its borrowing state.
///
/// `borrower_id` and `due_date` are set together when the book is lent and
/// cleared together when it comes back; `is_borrowed` mirrors their presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Whether a borrow is currently active
    pub is_borrowed: bool,
    /// Borrower identifier, present only while borrowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_id: Option<String>,
    /// End of the borrow window, present only while borrowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Book {
    /// Build an available book with a freshly generated id
    pub fn new(title: impl Into<String>, author: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            is_borrowed: false,
            borrower_id: None,
            due_date: None,
        }
    }

    /// Mark the book as lent to `borrower_id` until `due_date`
    pub fn lend(&mut self, borrower_id: String, due_date: DateTime<Utc>) {
        self.is_borrowed = true;
        self.borrower_id = Some(borrower_id);
        self.due_date = Some(due_date);
    }

    /// Clear every trace of the current borrow
    pub fn release(&mut self) {
        self.is_borrowed = false;
        self.borrower_id = None;
        self.due_date = None;
    }

    /// Apply the descriptive fields of an update. Borrowing state and id are
    /// not reachable from here.
    pub fn apply(&mut self, update: UpdateBook) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(genre) = update.genre {
            self.genre = genre;
        }
    }

    /// Conjunctive, case-sensitive substring match. Unset filters match anything.
    pub fn matches(&self, query: &BookQuery) -> bool {
        fn field_matches(value: &str, filter: Option<&str>) -> bool {
            filter.map_or(true, |f| value.contains(f))
        }

        field_matches(&self.title, query.title.as_deref())
            && field_matches(&self.author, query.author.as_deref())
            && field_matches(&self.genre, query.genre.as_deref())
    }
}

/// Create book request
///
/// Fields are optional at the wire level so that a missing field is reported
/// as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "author is required"),
        length(min = 1, message = "author must not be empty")
    )]
    pub author: Option<String>,
    #[validate(
        required(message = "genre is required"),
        length(min = 1, message = "genre must not be empty")
    )]
    pub genre: Option<String>,
}

impl CreateBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            genre: Some(genre.into()),
        }
    }

    /// Trim surrounding whitespace so that blank values fail validation
    pub fn normalized(self) -> Self {
        Self {
            title: trimmed(self.title),
            author: trimmed(self.author),
            genre: trimmed(self.genre),
        }
    }
}

/// Update book request
///
/// Only descriptive fields exist here. `id`, `isBorrowed`, `borrowerId` and
/// `dueDate` sent by a client are unknown keys and get dropped on
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "genre must not be empty"))]
    pub genre: Option<String>,
}

impl UpdateBook {
    pub fn normalized(self) -> Self {
        Self {
            title: trimmed(self.title),
            author: trimmed(self.author),
            genre: trimmed(self.genre),
        }
    }
}

/// Search filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Substring of the title
    pub title: Option<String>,
    /// Substring of the author
    pub author: Option<String>,
    /// Substring of the genre
    pub genre: Option<String>,
}

/// Borrow request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    #[validate(
        required(message = "borrowerId is required"),
        length(min = 1, message = "borrowerId must not be empty")
    )]
    pub borrower_id: Option<String>,
}

impl BorrowRequest {
    pub fn normalized(self) -> Self {
        Self {
            borrower_id: trimmed(self.borrower_id),
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
