use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{
    PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};
use uuid::Uuid;

use crate::{
    BookId, NewReview, Result, Review, ReviewId, ReviewQuery, SortDirection, SortField,
    store::ReviewStore,
};

const REVIEW_COLUMNS: &str = "id, rating_value, text, book_id, created_at, updated_at";

/// PostgreSQL-backed review store implementation.
#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    /// Creates a new PostgreSQL review store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_review(row: PgRow) -> Result<Review> {
        Ok(Review {
            id: ReviewId::from_uuid(row.try_get::<Uuid, _>("id")?),
            rating_value: row.try_get("rating_value")?,
            text: row.try_get("text")?,
            book_id: BookId::new(row.try_get("book_id")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn order_by(query: &ReviewQuery) -> &'static str {
        match query.sort {
            Some(sort) => match (sort.field, sort.direction) {
                (SortField::CreatedAt, SortDirection::Ascending) => {
                    " ORDER BY created_at ASC, seq ASC"
                }
                (SortField::CreatedAt, SortDirection::Descending) => {
                    " ORDER BY created_at DESC, seq DESC"
                }
            },
            None => " ORDER BY seq ASC",
        }
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    #[tracing::instrument(skip(self, review), fields(book_id = %review.book_id))]
    async fn insert(&self, review: NewReview) -> Result<Review> {
        let row = sqlx::query(&format!(
            "INSERT INTO reviews (id, rating_value, text, book_id) VALUES ($1, $2, $3, $4) RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(ReviewId::new().as_uuid())
        .bind(review.rating_value)
        .bind(&review.text)
        .bind(review.book_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_review(row)
    }

    async fn find(&self, query: ReviewQuery) -> Result<Vec<Review>> {
        let mut sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE 1=1");
        let mut param_count = 0;

        // Build dynamic query
        if query.book_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND book_id = ${param_count}"));
        }
        if query.book_ids.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND book_id = ANY(${param_count})"));
        }

        sql.push_str(Self::order_by(&query));

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }
        if query.offset.is_some() {
            param_count += 1;
            sql.push_str(&format!(" OFFSET ${param_count}"));
        }

        // Bind in the same order the placeholders were numbered
        let mut sqlx_query = sqlx::query(&sql);

        if let Some(book_id) = query.book_id {
            sqlx_query = sqlx_query.bind(book_id.as_i64());
        }
        if let Some(book_ids) = query.book_ids {
            let ids: Vec<i64> = book_ids.into_iter().map(i64::from).collect();
            sqlx_query = sqlx_query.bind(ids);
        }
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        if let Some(offset) = query.offset {
            sqlx_query = sqlx_query.bind(i64::try_from(offset).unwrap_or(i64::MAX));
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_review).collect()
    }

    async fn count_by_book(&self, book_ids: &[BookId]) -> Result<HashMap<BookId, u64>> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i64> = book_ids.iter().map(BookId::as_i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT book_id, COUNT(*) AS count
            FROM reviews
            WHERE book_id = ANY($1)
            GROUP BY book_id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<(BookId, u64)> {
                let book_id: i64 = row.try_get("book_id")?;
                let count: i64 = row.try_get("count")?;
                Ok((BookId::new(book_id), count.max(0) as u64))
            })
            .collect()
    }

    async fn get(&self, id: ReviewId) -> Result<Option<Review>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_review).transpose()
    }
}
