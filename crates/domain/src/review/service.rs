//! Review service providing the create, list and count operations.

use std::collections::BTreeMap;

use common::BookId;
use review_store::ReviewStore;

use crate::books::BookExistenceClient;
use crate::error::{DomainError, ValidationError};

use super::{CreateReview, ListReviews, ReviewDto, ReviewValidator};

/// Review counts keyed by book, covering exactly the requested books.
pub type ReviewCounts = BTreeMap<BookId, u64>;

/// Service for managing reviews.
///
/// Holds no per-request state; every operation goes straight to the store,
/// which is the only source of consistency.
pub struct ReviewService<S: ReviewStore, B: BookExistenceClient> {
    store: S,
    validator: ReviewValidator<B>,
}

impl<S: ReviewStore, B: BookExistenceClient> ReviewService<S, B> {
    /// Creates a new review service over the given store and book client.
    pub fn new(store: S, books: B) -> Self {
        Self {
            store,
            validator: ReviewValidator::new(books),
        }
    }

    /// Returns a reference to the underlying review store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a request rejected before it reached the service, such as a
    /// query parameter that is not a number, and returns it as a domain error.
    pub fn rejected(&self, operation: &'static str, err: ValidationError) -> DomainError {
        let err = DomainError::from(err);
        record_failure(operation, &err);
        err
    }

    /// Validates and stores a new review.
    ///
    /// Validation errors are returned unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, cmd: CreateReview) -> Result<ReviewDto, DomainError> {
        let new_review = self
            .validator
            .validate(cmd)
            .await
            .inspect_err(|e| record_failure("create", e))?;

        let review = self.store.insert(new_review).await?;

        metrics::counter!("reviews_created_total").increment(1);
        tracing::info!(review_id = %review.id, book_id = %review.book_id, "review created");

        Ok(review.into())
    }

    /// Lists one page of a book's reviews, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self, query: ListReviews) -> Result<Vec<ReviewDto>, DomainError> {
        let store_query = query
            .to_query()
            .map_err(DomainError::from)
            .inspect_err(|e| record_failure("find_all", e))?;

        let reviews = self.store.find(store_query).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    /// Counts reviews for each requested book.
    ///
    /// Every requested book appears in the result, with 0 when it has no
    /// reviews. Duplicate IDs collapse into a single entry.
    #[tracing::instrument(skip(self))]
    pub async fn count_reviews(
        &self,
        book_ids: Option<Vec<BookId>>,
    ) -> Result<ReviewCounts, DomainError> {
        let mut book_ids = book_ids
            .ok_or_else(|| DomainError::from(ValidationError::missing_book_ids()))
            .inspect_err(|e| record_failure("count_reviews", e))?;
        book_ids.sort_unstable();
        book_ids.dedup();

        let grouped = self.store.count_by_book(&book_ids).await?;

        Ok(book_ids
            .into_iter()
            .map(|id| (id, grouped.get(&id).copied().unwrap_or(0)))
            .collect())
    }
}

fn record_failure(operation: &'static str, err: &DomainError) {
    if let Some(validation) = err.as_validation() {
        metrics::counter!("reviews_validation_failures_total", "operation" => operation)
            .increment(1);
        tracing::debug!(operation, reason = %validation, "request rejected");
    }
}
