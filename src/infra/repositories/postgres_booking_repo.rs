use crate::domain::{
    models::booking::{Booking, BookingDetails, BookingFilter, NewBooking},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

const DETAILS_SELECT: &str = r#"SELECT b.id, b.event_id, b.venue_id, b.booking_date, b.created_at,
        e.name AS event_name, e.event_date, e.event_type_id, t.name AS event_type_name,
        v.name AS venue_name, v.location AS venue_location
    FROM bookings b
    JOIN events e ON e.id = b.event_id
    JOIN event_types t ON t.id = e.event_type_id
    JOIN venues v ON v.id = b.venue_id"#;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (event_id, venue_id, booking_date, created_at) VALUES ($1, $2, $3, $4) RETURNING *"
        )
            .bind(booking.event_id).bind(booking.venue_id).bind(booking.booking_date).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_details(&self, id: i64) -> Result<Option<BookingDetails>, AppError> {
        let sql = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, BookingDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search(&self, filter: &BookingFilter) -> Result<Vec<BookingDetails>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(DETAILS_SELECT);
        qb.push(" WHERE TRUE");

        // search_name and the pattern are both folded with Rust's Unicode lower-casing
        if let Some(pattern) = filter.search_pattern() {
            qb.push(" AND (CAST(b.id AS TEXT) LIKE ").push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR e.search_name LIKE ").push_bind(pattern)
                .push(r" ESCAPE '\')");
        }
        if let Some(event_type_id) = filter.event_type_id {
            qb.push(" AND e.event_type_id = ").push_bind(event_type_id);
        }
        if let Some(venue_id) = filter.venue_id {
            qb.push(" AND b.venue_id = ").push_bind(venue_id);
        }
        if let Some(start) = filter.start_date {
            qb.push(" AND b.booking_date >= ").push_bind(start);
        }
        if let Some(end) = filter.end_date {
            qb.push(" AND b.booking_date <= ").push_bind(end);
        }
        if filter.available_only {
            debug!("available_only filter requested; it does not narrow the result");
        }
        qb.push(" ORDER BY b.booking_date ASC, b.id ASC");

        qb.build_query_as::<BookingDetails>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET event_id=$1, venue_id=$2, booking_date=$3
             WHERE id=$4
             RETURNING *"
        )
            .bind(booking.event_id).bind(booking.venue_id).bind(booking.booking_date).bind(booking.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }

    async fn count_for_venue_on(&self, venue_id: i64, date: NaiveDate, excluding: Option<i64>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE venue_id = $1 AND booking_date = $2 AND id IS DISTINCT FROM $3")
            .bind(venue_id).bind(date).bind(excluding)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_venue(&self, venue_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE venue_id = $1").bind(venue_id).fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_event(&self, event_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE event_id = $1").bind(event_id).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
