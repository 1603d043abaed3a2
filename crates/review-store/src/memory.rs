use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    BookId, NewReview, Result, Review, ReviewId, ReviewQuery, SortDirection, SortField,
    store::ReviewStore,
};

/// In-memory review store implementation for testing and local runs.
///
/// Reviews are kept in insertion order, which doubles as the tie-breaker
/// when two reviews share a timestamp. Provides the same interface as the
/// PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryReviewStore {
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl InMemoryReviewStore {
    /// Creates a new empty in-memory review store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of reviews stored.
    pub async fn review_count(&self) -> usize {
        self.reviews.read().await.len()
    }

    /// Clears all reviews.
    pub async fn clear(&self) {
        self.reviews.write().await.clear();
    }

    /// Inserts a review stamped with an explicit creation time.
    ///
    /// Lets tests and seed data control ordering without sleeping.
    pub async fn insert_at(&self, review: NewReview, created_at: DateTime<Utc>) -> Review {
        let review = review.into_review(ReviewId::new(), created_at);
        self.reviews.write().await.push(review.clone());
        review
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: NewReview) -> Result<Review> {
        Ok(self.insert_at(review, Utc::now()).await)
    }

    async fn find(&self, query: ReviewQuery) -> Result<Vec<Review>> {
        let store = self.reviews.read().await;
        let mut matched: Vec<(usize, &Review)> = store
            .iter()
            .enumerate()
            .filter(|(_, r)| query.matches(r.book_id))
            .collect();

        if let Some(sort) = query.sort {
            matched.sort_by(|(seq_a, a), (seq_b, b)| {
                let ordering = match sort.field {
                    SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                }
                .then(seq_a.cmp(seq_b));
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        // Apply offset and limit
        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn count_by_book(&self, book_ids: &[BookId]) -> Result<HashMap<BookId, u64>> {
        let store = self.reviews.read().await;
        let counts = store
            .iter()
            .filter(|r| book_ids.contains(&r.book_id))
            .fold(HashMap::new(), |mut counts, r| {
                *counts.entry(r.book_id).or_insert(0) += 1;
                counts
            });
        Ok(counts)
    }

    async fn get(&self, id: ReviewId) -> Result<Option<Review>> {
        let store = self.reviews.read().await;
        Ok(store.iter().find(|r| r.id == id).cloned())
    }
}
