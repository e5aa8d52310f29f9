use crate::domain::{models::event_type::EventType, ports::EventTypeRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventTypeRepo {
    pool: PgPool,
}

impl PostgresEventTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventTypeRepository for PostgresEventTypeRepo {
    async fn find_by_id(&self, id: i64) -> Result<Option<EventType>, AppError> {
        sqlx::query_as::<_, EventType>("SELECT id, name FROM event_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<EventType>, AppError> {
        sqlx::query_as::<_, EventType>("SELECT id, name FROM event_types ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
