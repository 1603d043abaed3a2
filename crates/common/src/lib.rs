//! Identifier types shared across the book reviews crates.

pub mod types;

pub use types::{BookId, ReviewId};
