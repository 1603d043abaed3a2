//! Domain error types.

use review_store::StoreError;
use thiserror::Error;

use crate::books::BookClientError;

/// A business-rule violation, reported to the caller with its message intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn missing_book_id() -> Self {
        Self::new("review should have bookId!")
    }

    pub fn unknown_book() -> Self {
        Self::new("no book with such id exists!")
    }

    pub fn missing_text() -> Self {
        Self::new("review should have text!")
    }

    pub fn text_too_short() -> Self {
        Self::new("review text should have at least 3 symbols!")
    }

    pub fn missing_rating_value() -> Self {
        Self::new("review should have ratingValue!")
    }

    pub fn rating_out_of_range() -> Self {
        Self::new("review rating value should be between 1 and 5!")
    }

    pub fn missing_book_id_param() -> Self {
        Self::new("bookId parameter is required!")
    }

    pub fn invalid_book_id_param() -> Self {
        Self::new("bookId parameter should be an integer!")
    }

    pub fn invalid_size() -> Self {
        Self::new("size parameter should be positive number!")
    }

    pub fn invalid_from() -> Self {
        Self::new("from parameter should be greater than 0!")
    }

    pub fn missing_book_ids() -> Self {
        Self::new("you need to provide array of bookIds!")
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request broke a business rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error occurred in the review store.
    #[error("Review store error: {0}")]
    Store(#[from] StoreError),

    /// The book service could not be reached.
    #[error("Book service error: {0}")]
    BookService(#[from] BookClientError),
}

impl DomainError {
    /// Returns the validation error if this is a business-rule violation.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            DomainError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
