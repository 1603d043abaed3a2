use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BookId, ReviewId};

/// A review as persisted by the store.
///
/// `id`, `created_at` and `updated_at` are assigned by the store on insert;
/// the remaining fields come from the [`NewReview`] that was inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating_value: i32,
    pub text: String,
    pub book_id: BookId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review fields that have passed validation but have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub rating_value: i32,
    pub text: String,
    pub book_id: BookId,
}

impl NewReview {
    pub fn new(book_id: BookId, rating_value: i32, text: impl Into<String>) -> Self {
        Self {
            rating_value,
            text: text.into(),
            book_id,
        }
    }

    /// Turns the new review into a stored one with the given identity and timestamp.
    pub(crate) fn into_review(self, id: ReviewId, now: DateTime<Utc>) -> Review {
        Review {
            id,
            rating_value: self.rating_value,
            text: self.text,
            book_id: self.book_id,
            created_at: now,
            updated_at: now,
        }
    }
}
