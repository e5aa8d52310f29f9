use crate::domain::{models::venue::{NewVenue, Venue}, ports::VenueRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteVenueRepo {
    pool: SqlitePool,
}

impl SqliteVenueRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for SqliteVenueRepo {
    async fn create(&self, venue: &NewVenue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (name, location, capacity, image_url, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&venue.name)
            .bind(&venue.location)
            .bind(venue.capacity)
            .bind(&venue.image_url)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "UPDATE venues SET name=?, location=?, capacity=?, image_url=? WHERE id=? RETURNING *"
        )
            .bind(&venue.name)
            .bind(&venue.location)
            .bind(venue.capacity)
            .bind(&venue.image_url)
            .bind(venue.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Venue not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venue not found".into()));
        }
        Ok(())
    }
}
