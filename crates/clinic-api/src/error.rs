//! API error type and its JSON response shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use clinic_core::{ClinicError, DbError};

/// Error response body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        match err {
            ClinicError::Validation(msg) | ClinicError::Conflict(msg) => ApiError::BadRequest(msg),
            ClinicError::InsufficientStock { medicine_id } => {
                tracing::debug!(medicine_id, "Bill rejected for stock");
                ApiError::BadRequest("Insufficient stock".into())
            }
            ClinicError::NotFound(msg) => ApiError::NotFound(msg),
            ClinicError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn detail_of(response: Response) -> String {
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["detail"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn conflict_returns_400_with_message() {
        let err: ApiError =
            ClinicError::Conflict("Medicine with this name already exists".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            detail_of(response).await,
            "Medicine with this name already exists"
        );
    }

    #[tokio::test]
    async fn insufficient_stock_returns_400() {
        let err: ApiError = ClinicError::InsufficientStock { medicine_id: 3 }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail_of(response).await, "Insufficient stock");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let err: ApiError = ClinicError::NotFound("Patient not found".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(detail_of(response).await, "Patient not found");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let err: ApiError = DbError::Constraint("disk on fire".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail_of(response).await, "Internal server error");
    }
}
