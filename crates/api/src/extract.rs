//! Request extractors whose rejections match the API's error contract.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use nudge_core::error::CoreError;

use crate::error::AppError;

/// `axum::Json` with the rejection mapped into [`AppError`].
///
/// A body that fails to deserialize is a validation failure like any
/// other: 400 with a `{"error": …}` JSON object, instead of axum's
/// default plain-text 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}
