use crate::domain::validation::FieldErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Conflict on {field}: {message}")]
    FieldConflict { field: String, message: String },
    #[error("Validation failed")]
    Invalid(FieldErrors),
    #[error("Delete blocked: {0}")]
    DeleteBlocked(String),
}

impl AppError {
    /// 2067 = SQLite unique constraint, 23505 = PostgreSQL unique violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => e.as_database_error().is_some_and(|db| db.is_unique_violation()),
            _ => false,
        }
    }

    /// 787 = SQLite foreign key constraint, 23503 = PostgreSQL foreign key violation
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            AppError::Database(e) => e.as_database_error().is_some_and(|db| db.is_foreign_key_violation()),
            _ => false,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Invalid(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_unique_violation() {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Resource already exists (duplicate entry)" })),
            )
                .into_response();
        }
        if self.is_foreign_key_violation() {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Resource is linked to other records" })),
            )
                .into_response();
        }

        let (status, message) = match self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DeleteBlocked(msg) => (StatusCode::CONFLICT, msg),
            AppError::FieldConflict { field, message } => {
                let body = Json(json!({
                    "error": message,
                    "field_errors": FieldErrors::single(&field, message.clone()),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::Invalid(errors) => {
                let body = Json(json!({
                    "error": "Validation failed",
                    "field_errors": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
