//! Loan management service

use std::sync::Arc;

use chrono::Duration;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::book::Book,
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    clock: Arc<dyn Clock>,
    loan_duration_days: i64,
}

impl LoansService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>, loan_duration_days: i64) -> Self {
        Self {
            repository,
            clock,
            loan_duration_days,
        }
    }

    /// Borrow a book for the configured window.
    ///
    /// Returns `None` both for an unknown id and for a book that is already
    /// out; callers cannot tell the two apart.
    pub fn borrow_book(&self, id: &str, borrower_id: String) -> AppResult<Option<Book>> {
        let due_date = Duration::try_days(self.loan_duration_days)
            .and_then(|window| self.clock.now().checked_add_signed(window))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Loan duration of {} days is out of range",
                    self.loan_duration_days
                ))
            })?;
        let book = self.repository.books.borrow(id, borrower_id, due_date)?;

        match &book {
            Some(book) => tracing::info!(
                book_id = %book.id,
                borrower_id = ?book.borrower_id,
                due_date = %due_date,
                "book borrowed"
            ),
            None => tracing::debug!(book_id = %id, "borrow refused"),
        }
        Ok(book)
    }

    /// Return a borrowed book. `None` for an unknown id or a book that is not out.
    pub fn return_book(&self, id: &str) -> AppResult<Option<Book>> {
        let book = self.repository.books.return_book(id)?;

        match &book {
            Some(_) => tracing::info!(book_id = %id, "book returned"),
            None => tracing::debug!(book_id = %id, "return refused"),
        }
        Ok(book)
    }
}
