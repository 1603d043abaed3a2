//! HTTP client for the book service.

use async_trait::async_trait;
use common::BookId;
use reqwest::{Client, ClientBuilder, StatusCode, Url};

use super::{BookClientError, BookExistenceClient};

/// Checks book existence with `GET <base_url><book_id>`.
///
/// Only `200 OK` means the book exists; every other status, including
/// `404 Not Found`, means it does not.
#[derive(Debug, Clone)]
pub struct HttpBookClient {
    client: Client,
    base_url: Url,
}

impl HttpBookClient {
    /// Where the book service lives inside the deployment network.
    pub const DEFAULT_BASE_URL: &'static str = "http://book-app:8080/api/books/";

    const USER_AGENT: &'static str = concat!("book-reviews/", env!("CARGO_PKG_VERSION"));

    /// Creates a client with a default reqwest client.
    pub fn new(base_url: &str) -> Result<Self, BookClientError> {
        Self::with_client(build_client(Self::USER_AGENT)?, base_url)
    }

    /// Creates a client on top of an existing reqwest client.
    ///
    /// A trailing slash is appended to `base_url` when missing so the book ID
    /// becomes the last path segment.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BookClientError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| BookClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BookClientError::InvalidBaseUrl {
                url: normalized,
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn book_url(&self, book_id: BookId) -> Result<Url, BookClientError> {
        self.base_url
            .join(&book_id.to_string())
            .map_err(|e| BookClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

fn build_client(user_agent: &str) -> Result<Client, BookClientError> {
    ClientBuilder::new()
        .user_agent(user_agent)
        .build()
        .map_err(BookClientError::ClientBuild)
}

#[async_trait]
impl BookExistenceClient for HttpBookClient {
    #[tracing::instrument(skip(self))]
    async fn exists(&self, book_id: BookId) -> Result<bool, BookClientError> {
        let url = self.book_url(book_id)?;

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(source) => {
                metrics::counter!("book_existence_checks_total", "outcome" => "error")
                    .increment(1);
                tracing::warn!(%url, error = %source, "book service request failed");
                return Err(BookClientError::Transport {
                    url: url.to_string(),
                    source,
                });
            }
        };

        let exists = response.status() == StatusCode::OK;
        let outcome = if exists { "found" } else { "missing" };
        metrics::counter!("book_existence_checks_total", "outcome" => outcome).increment(1);
        tracing::debug!(status = %response.status(), exists, "book existence checked");

        Ok(exists)
    }
}
