//! Inputs accepted by the review service.

use common::BookId;
use review_store::ReviewQuery;

use crate::error::ValidationError;

/// Number of reviews returned when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Request to create a review.
///
/// Every field is optional here; [`crate::ReviewValidator`] decides what is
/// missing or invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateReview {
    pub rating_value: Option<i64>,
    pub text: Option<String>,
    pub book_id: Option<BookId>,
}

impl CreateReview {
    /// Creates a request with all fields present.
    pub fn new(book_id: BookId, rating_value: i64, text: impl Into<String>) -> Self {
        Self {
            rating_value: Some(rating_value),
            text: Some(text.into()),
            book_id: Some(book_id),
        }
    }
}

/// Request for one page of a book's reviews, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReviews {
    pub book_id: Option<BookId>,
    /// Page size, at least 1. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub size: Option<i64>,
    /// Number of leading reviews to skip, at least 0. Defaults to 0.
    pub from: Option<i64>,
}

impl ListReviews {
    pub fn for_book(book_id: BookId) -> Self {
        Self {
            book_id: Some(book_id),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_from(mut self, from: i64) -> Self {
        self.from = Some(from);
        self
    }

    /// Checks the parameters and builds the store query.
    pub fn to_query(&self) -> Result<ReviewQuery, ValidationError> {
        let book_id = self.book_id.ok_or_else(ValidationError::missing_book_id_param)?;

        let size = match self.size {
            Some(size) if size < 1 => return Err(ValidationError::invalid_size()),
            Some(size) => usize::try_from(size).unwrap_or(usize::MAX),
            None => DEFAULT_PAGE_SIZE,
        };
        let from = match self.from {
            Some(from) if from < 0 => return Err(ValidationError::invalid_from()),
            Some(from) => usize::try_from(from).unwrap_or(usize::MAX),
            None => 0,
        };

        Ok(ReviewQuery::for_book(book_id)
            .newest_first()
            .offset(from)
            .limit(size))
    }
}
