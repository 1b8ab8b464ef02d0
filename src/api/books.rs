//! Book (catalog) and loan endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::AppJson;
use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::book::{Book, BookQuery, BorrowRequest, CreateBook, UpdateBook},
};

/// List every book in catalog order
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books()?;
    Ok(Json(books))
}

/// Search books by title, author and genre
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&query)?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&id)?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing or empty field, or malformed body", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(book): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update title, author or genre of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Empty field or malformed body", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    AppJson(book): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(&id, book)?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.services.catalog.delete_book(&id)? {
        return Err(AppError::NotFound(format!("Book {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// First books of the catalog
#[utoipa::path(
    get,
    path = "/books/recommendations",
    tag = "books",
    responses(
        (status = 200, description = "Recommended books", body = Vec<Book>)
    )
)]
pub async fn recommendations(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.recommendations()?;
    Ok(Json(books))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/books/{id}/borrow",
    tag = "loans",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book borrowed", body = Book),
        (status = 400, description = "Missing borrowerId or malformed body", body = ErrorResponse),
        (status = 404, description = "Book not found or already borrowed", body = ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<BorrowRequest>,
) -> AppResult<Json<Book>> {
    let request = request.normalized();
    request.validate()?;
    let Some(borrower_id) = request.borrower_id else {
        return Err(AppError::Validation("borrowerId is required".to_string()));
    };

    state
        .services
        .loans
        .borrow_book(&id, borrower_id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Book not found or already borrowed".to_string()))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "loans",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found or not currently borrowed", body = ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    state
        .services
        .loans
        .return_book(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Book not found or not currently borrowed".to_string()))
}
