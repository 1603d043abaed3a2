//! Domain layer for the book reviews service.
//!
//! This crate provides:
//! - BookExistenceClient trait for the remote book lookup, with HTTP and
//!   in-memory implementations
//! - ReviewValidator enforcing field and cross-service rules before a
//!   review is stored
//! - ReviewService orchestrating validation, persistence, listing and
//!   grouped counts

pub mod books;
pub mod error;
pub mod review;

pub use books::{BookClientError, BookExistenceClient, HttpBookClient, InMemoryBookClient};
pub use common::{BookId, ReviewId};
pub use error::{DomainError, ValidationError};
pub use review::{
    CreateReview, DEFAULT_PAGE_SIZE, ListReviews, ReviewCounts, ReviewDto, ReviewService,
    ReviewValidator,
};
