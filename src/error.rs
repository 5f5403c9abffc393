use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StorageError;
use crate::validation::FieldError;

/// Outcome of a failed contact operation. Each variant maps to exactly one
/// HTTP response.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("contact not found")]
    NotFound,

    #[error("principal does not own the contact")]
    NotAuthorized,

    #[error("storage failure")]
    Storage(#[from] StorageError),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::NotFound => StatusCode::NOT_FOUND,
            ContactError::NotAuthorized => StatusCode::UNAUTHORIZED,
            ContactError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ContactError::Validation(errors) => {
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            ContactError::NotFound => {
                (status, Json(json!({ "msg": "Contact not found" }))).into_response()
            }
            ContactError::NotAuthorized => {
                (status, Json(json!({ "msg": "Not authorized" }))).into_response()
            }
            // Logged where it was raised; the body stays opaque.
            ContactError::Storage(_) => (status, "Server Error").into_response(),
        }
    }
}

pub type ContactResult<T> = Result<T, ContactError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ContactError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn storage_error_body_is_opaque() {
        let err = ContactError::from(StorageError::Unavailable("secret host down".to_string()));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Server Error");
    }

    #[tokio::test]
    async fn validation_error_lists_fields() {
        let err = ContactError::Validation(vec![FieldError::body_field("name", "Name is required")]);
        let (status, body) = body_of(err).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["param"], "name");
    }

    #[test]
    fn status_codes() {
        assert_eq!(ContactError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ContactError::NotAuthorized.status(), StatusCode::UNAUTHORIZED);
    }
}
