//! Review repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use namo_core::{ProductId, Rating, Review, ReviewId};

use super::RepositoryError;

/// Fields needed to insert a review.
#[derive(Debug)]
pub struct NewReview<'a> {
    pub product_id: ProductId,
    pub name: &'a str,
    pub review: &'a str,
    pub rating: Rating,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    product_id: ProductId,
    name: String,
    review: String,
    rating: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let stars = u8::try_from(row.rating).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid rating in database: {e}"))
        })?;
        let rating = Rating::new(stars).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid rating in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            name: row.name,
            review: row.review,
            rating,
            created_at: row.created_at,
        })
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, product_id, name, review, rating, created_at
            FROM reviews
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }

    /// Insert a new review and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the referenced product doesn't
    /// exist, `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewReview<'_>) -> Result<ReviewId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO reviews (product_id, name, review, rating, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(new.product_id)
        .bind(new.name)
        .bind(new.review)
        .bind(i64::from(new.rating.stars()))
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(ReviewId::new(id))
    }
}
