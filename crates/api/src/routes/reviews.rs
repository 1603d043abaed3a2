//! Review create, list and count endpoints.

use std::num::IntErrorKind;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use domain::{
    BookExistenceClient, BookId, CreateReview, ListReviews, ReviewCounts, ReviewDto,
    ReviewService, ValidationError,
};
use review_store::ReviewStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: ReviewStore, B: BookExistenceClient> {
    pub review_service: ReviewService<S, B>,
}

// -- Request types --

/// Numbers are kept as JSON numbers so that values outside `i64` reach
/// validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating_value: Option<Number>,
    pub text: Option<String>,
    pub book_id: Option<Number>,
}

/// Raw query parameters; parsed by hand so bad values get domain messages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsParams {
    pub book_id: Option<String>,
    pub size: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountReviewsRequest {
    pub book_ids: Option<Vec<i64>>,
}

// -- Response types --

/// Envelope used for successful create and list responses.
#[derive(Debug, Serialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl TryFrom<CreateReviewRequest> for CreateReview {
    type Error = ValidationError;

    /// Fails only for a book ID that no book can have; every other rule is
    /// left to the validator.
    fn try_from(req: CreateReviewRequest) -> Result<Self, Self::Error> {
        let book_id = match req.book_id {
            None => None,
            Some(raw) => Some(
                raw.as_i64()
                    .map(BookId::new)
                    .ok_or_else(ValidationError::unknown_book)?,
            ),
        };

        Ok(CreateReview {
            // Fractions and integers beyond i64 are never valid ratings.
            rating_value: req
                .rating_value
                .map(|raw| raw.as_i64().unwrap_or(i64::MAX)),
            text: req.text,
            book_id,
        })
    }
}

impl TryFrom<ListReviewsParams> for ListReviews {
    type Error = ValidationError;

    fn try_from(params: ListReviewsParams) -> Result<Self, Self::Error> {
        let Some(book_id) = parse_param(params.book_id, ValidationError::invalid_book_id_param)?
        else {
            // Missing bookId is reported before any paging problem.
            return Ok(ListReviews::default());
        };

        Ok(ListReviews {
            book_id: Some(BookId::new(book_id)),
            size: parse_saturating_param(params.size, ValidationError::invalid_size)?,
            from: parse_saturating_param(params.from, ValidationError::invalid_from)?,
        })
    }
}

// -- Handlers --

/// POST /api/reviews — validate and store a review.
#[tracing::instrument(skip(state, body))]
pub async fn create<S, B>(
    State(state): State<Arc<AppState<S, B>>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ResultResponse<ReviewDto>>), ApiError>
where
    S: ReviewStore + 'static,
    B: BookExistenceClient + 'static,
{
    let req: CreateReviewRequest = parse_json_body(&body)?;
    let cmd = CreateReview::try_from(req)
        .map_err(|e| state.review_service.rejected("create", e))
        .inspect_err(|e| tracing::warn!(error = %e, "error creating review"))?;

    let result = state
        .review_service
        .create(cmd)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "error creating review"))?;

    Ok((StatusCode::CREATED, Json(ResultResponse { result })))
}

/// GET /api/reviews?bookId=&size=&from= — one page of a book's reviews, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<S, B>(
    State(state): State<Arc<AppState<S, B>>>,
    Query(params): Query<ListReviewsParams>,
) -> Result<Json<ResultResponse<Vec<ReviewDto>>>, ApiError>
where
    S: ReviewStore + 'static,
    B: BookExistenceClient + 'static,
{
    let query = ListReviews::try_from(params)
        .map_err(|e| state.review_service.rejected("find_all", e))
        .inspect_err(|e| tracing::warn!(error = %e, "error reading reviews"))?;

    let result = state
        .review_service
        .find_all(query)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "error reading reviews"))?;

    Ok(Json(ResultResponse { result }))
}

/// POST /api/reviews/_counts — review counts for a set of books.
#[tracing::instrument(skip(state, body))]
pub async fn counts<S, B>(
    State(state): State<Arc<AppState<S, B>>>,
    body: Bytes,
) -> Result<Json<ReviewCounts>, ApiError>
where
    S: ReviewStore + 'static,
    B: BookExistenceClient + 'static,
{
    let req: CountReviewsRequest = parse_json_body(&body)?;
    let book_ids = req
        .book_ids
        .map(|ids| ids.into_iter().map(BookId::new).collect());

    let counts = state
        .review_service
        .count_reviews(book_ids)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "error counting reviews"))?;

    Ok(Json(counts))
}

/// Parses a JSON body, treating an empty body as an empty object.
fn parse_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// Parses an optional integer parameter; blank counts as absent.
fn parse_param(
    value: Option<String>,
    invalid: fn() -> ValidationError,
) -> Result<Option<i64>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| invalid()),
    }
}

/// Like [`parse_param`], but integers beyond `i64` clamp to its bounds.
fn parse_saturating_param(
    value: Option<String>,
    invalid: fn() -> ValidationError,
) -> Result<Option<i64>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) => Ok(Some(n)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Some(i64::MAX)),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(Some(i64::MIN)),
            Err(_) => Err(invalid()),
        },
    }
}
