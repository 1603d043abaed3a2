//! Reviews: creation commands, validation, the service and its DTOs.

mod commands;
mod dto;
mod service;
mod validator;

pub use commands::{CreateReview, DEFAULT_PAGE_SIZE, ListReviews};
pub use dto::ReviewDto;
pub use service::{ReviewCounts, ReviewService};
pub use validator::{MAX_RATING, MIN_RATING, MIN_TEXT_LENGTH, ReviewValidator};
