//! Externally visible review shape.

use chrono::{DateTime, Utc};
use common::{BookId, ReviewId};
use review_store::Review;
use serde::{Deserialize, Serialize};

/// A review as returned to callers.
///
/// Unlike [`Review`], it leaves out `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: ReviewId,
    pub rating_value: i32,
    pub text: String,
    pub book_id: BookId,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            rating_value: review.rating_value,
            text: review.text,
            book_id: review.book_id,
            created_at: review.created_at,
        }
    }
}
