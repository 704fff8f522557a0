use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use store::StoreError;

/// Store failures surface as opaque 500s. The body keeps the original
/// contract's shape: `{"message": "Server error: <details>"}`.
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(serde_json::json!({
            "message": format!("Server error: {}", self.0),
        }));
        (status, body).into_response()
    }
}
