use std::collections::HashMap;

use async_trait::async_trait;

use crate::{BookId, NewReview, Result, Review, ReviewId, ReviewQuery};

/// Core trait for review store implementations.
///
/// The store owns reviews exclusively: it assigns identity and timestamps
/// on insert and is the only source of consistency for concurrent writers.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persists a validated review.
    ///
    /// Returns the stored review with its new ID and `created_at`/`updated_at`
    /// set to the time of the write.
    async fn insert(&self, review: NewReview) -> Result<Review>;

    /// Retrieves reviews matching a query.
    ///
    /// Filtering happens first, then sorting, then `offset` and `limit`.
    async fn find(&self, query: ReviewQuery) -> Result<Vec<Review>>;

    /// Counts reviews grouped by book, restricted to `book_ids`.
    ///
    /// Books with no reviews may be absent from the returned map.
    async fn count_by_book(&self, book_ids: &[BookId]) -> Result<HashMap<BookId, u64>>;

    /// Retrieves a single review by ID.
    ///
    /// Returns None if no such review exists.
    async fn get(&self, id: ReviewId) -> Result<Option<Review>>;
}
