//! In-memory book existence client.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::BookId;
use tokio::sync::RwLock;

use super::{BookClientError, BookExistenceClient};

/// In-memory book client for testing and running without the book service.
///
/// Clones share state, so a test can keep a handle and change the known
/// books or availability after handing a clone to the service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookClient {
    books: Arc<RwLock<HashSet<BookId>>>,
    unavailable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryBookClient {
    /// Creates a client that knows no books.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that knows the given books.
    pub fn with_books(books: impl IntoIterator<Item = BookId>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books.into_iter().collect())),
            ..Default::default()
        }
    }

    /// Registers a book as existing.
    pub async fn add_book(&self, book_id: BookId) {
        self.books.write().await.insert(book_id);
    }

    /// Makes every subsequent check fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns how many existence checks were made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookExistenceClient for InMemoryBookClient {
    async fn exists(&self, book_id: BookId) -> Result<bool, BookClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BookClientError::Unavailable);
        }

        Ok(self.books.read().await.contains(&book_id))
    }
}
