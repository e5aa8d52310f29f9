use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;
use crate::domain::validation::FieldErrors;
use crate::error::AppError;

/// Key used in `field_errors` when the body as a whole is unusable.
pub const BODY_FIELD: &str = "body";

/// JSON request body. Unlike `axum::Json`, a bad body is rejected with the
/// same `field_errors` shape as a failed validation.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json") || ct.contains("+json"));
        if !is_json {
            return Err(body_error("Expected a JSON request body"));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| body_error(rejection.body_text()))?;

        decode(&bytes).map(JsonBody)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(field_error)?;
    de.end().map_err(|_| body_error("Request body is not valid JSON"))?;
    Ok(value)
}

fn field_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let path = err.path().to_string();
    let inner = err.into_inner();

    if inner.is_syntax() || inner.is_eof() {
        return body_error("Request body is not valid JSON");
    }
    if path == "." {
        return body_error("Request body must be a JSON object");
    }
    AppError::Invalid(FieldErrors::single(&path, format!("{} has an invalid value", path)))
}

fn body_error(message: impl Into<String>) -> AppError {
    AppError::Invalid(FieldErrors::single(BODY_FIELD, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::BookingInput;

    fn field_errors(result: Result<BookingInput, AppError>) -> FieldErrors {
        match result {
            Err(AppError::Invalid(errors)) => errors,
            Err(other) => panic!("Expected field errors, got {:?}", other),
            Ok(input) => panic!("Expected failure, decoded {:?}", input),
        }
    }

    #[test]
    fn test_wrong_type_is_keyed_by_field() {
        let errors = field_errors(decode(br#"{"event_id": "abc", "venue_id": 1}"#));
        assert_eq!(errors.get("event_id"), Some(&["event_id has an invalid value".to_string()][..]));
    }

    #[test]
    fn test_broken_json_is_keyed_by_body() {
        let errors = field_errors(decode(br#"{"event_id": 1,"#));
        assert_eq!(errors.get(BODY_FIELD), Some(&["Request body is not valid JSON".to_string()][..]));

        let errors = field_errors(decode(br#""just text""#));
        assert_eq!(errors.get(BODY_FIELD), Some(&["Request body must be a JSON object".to_string()][..]));
    }

    #[test]
    fn test_valid_body_decodes() {
        let input: BookingInput = decode(br#"{"event_id": 3, "venue_id": 4, "booking_date": "2025-06-01"}"#).unwrap();
        assert_eq!(input.event_id, Some(3));
        assert_eq!(input.venue_id, Some(4));
    }
}
