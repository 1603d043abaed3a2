//! Validation run before a review is stored.

use review_store::NewReview;

use crate::books::BookExistenceClient;
use crate::error::{DomainError, ValidationError};

use super::CreateReview;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
/// Minimum number of characters in a review text after trimming.
pub const MIN_TEXT_LENGTH: usize = 3;

/// Enforces the field and cross-service rules for new reviews.
///
/// Rules are checked in a fixed order and the first violation wins:
/// 1. the book ID is present and the book service knows it
/// 2. the text is present and long enough
/// 3. the rating is present and in range
pub struct ReviewValidator<B: BookExistenceClient> {
    books: B,
}

impl<B: BookExistenceClient> ReviewValidator<B> {
    pub fn new(books: B) -> Self {
        Self { books }
    }

    /// Validates a create request, returning the review ready to store.
    ///
    /// A failing book service is reported as [`DomainError::BookService`],
    /// not as a missing book.
    #[tracing::instrument(skip(self, review), fields(book_id = ?review.book_id))]
    pub async fn validate(&self, review: CreateReview) -> Result<NewReview, DomainError> {
        let book_id = review
            .book_id
            .ok_or_else(ValidationError::missing_book_id)?;
        if !self.books.exists(book_id).await? {
            return Err(ValidationError::unknown_book().into());
        }

        let text = review.text.ok_or_else(ValidationError::missing_text)?;
        check_text(&text)?;

        let rating_value = review
            .rating_value
            .ok_or_else(ValidationError::missing_rating_value)?;
        let rating_value = check_rating(rating_value)?;

        Ok(NewReview::new(book_id, rating_value, text))
    }
}

fn check_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() < MIN_TEXT_LENGTH {
        return Err(ValidationError::text_too_short());
    }
    Ok(())
}

fn check_rating(rating_value: i64) -> Result<i32, ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating_value) {
        return Err(ValidationError::rating_out_of_range());
    }
    i32::try_from(rating_value).map_err(|_| ValidationError::rating_out_of_range())
}
