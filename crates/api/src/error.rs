use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nudge_core::error::CoreError;
use nudge_db::StoreError;
use nudge_store::ObjectStoreError;
use serde_json::json;

/// Canonical 500 body. Storage and upload details are logged, never
/// leaked to the client.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors plus the storage and upload
/// error types. Implements [`IntoResponse`] so every failure becomes a
/// JSON object with a single `error` string.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `nudge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A nudge store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An object store (upload) failure.
    #[error(transparent)]
    Upload(#[from] ObjectStoreError),

    /// A malformed request (e.g. a broken multipart stream).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(%entity, %id, "Lookup missed");
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Nudge store error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }

            AppError::Upload(err) => {
                tracing::error!(error = %err, "Upload error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn not_found_maps_to_404_with_entity_message() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Nudge",
            id: uuid::Uuid::nil(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Core(CoreError::Validation("No file uploaded".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upload_failures_map_to_500() {
        let err = AppError::Upload(ObjectStoreError::Upload("bucket unreachable".into()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
