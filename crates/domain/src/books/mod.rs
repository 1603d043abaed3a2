//! Book existence checks against the external book service.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use common::BookId;
use thiserror::Error;

pub use http::HttpBookClient;
pub use memory::InMemoryBookClient;

/// Errors raised while asking the book service about a book.
///
/// A book that does not exist is not an error; see [`BookExistenceClient::exists`].
#[derive(Debug, Error)]
pub enum BookClientError {
    /// The request could not be sent or no response arrived.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The underlying HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The configured base URL is unusable.
    #[error("Invalid book service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The service is marked unavailable (in-memory client only).
    #[error("Book service unavailable")]
    Unavailable,
}

/// Trait for checking that a book exists in the book service.
#[async_trait]
pub trait BookExistenceClient: Send + Sync {
    /// Returns whether `book_id` refers to an existing book.
    ///
    /// Transport failures are returned as errors and never retried.
    async fn exists(&self, book_id: BookId) -> Result<bool, BookClientError>;
}
