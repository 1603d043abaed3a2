pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod review;
pub mod store;

pub use common::{BookId, ReviewId};
pub use error::{Result, StoreError};
pub use memory::InMemoryReviewStore;
pub use postgres::PostgresReviewStore;
pub use query::{ReviewQuery, SortDirection, SortField, SortKey};
pub use review::{NewReview, Review};
pub use store::ReviewStore;
