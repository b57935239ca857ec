use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        match self {
            AppError::MalformedPayload
            | AppError::MissingFields
            | AppError::InvalidEmailFormat => {
                error_resp(StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::DuplicateEmail => error_resp(StatusCode::CONFLICT, self.to_string()),
            AppError::MethodNotAllowed => {
                error_resp(StatusCode::METHOD_NOT_ALLOWED, self.to_string())
            }
            // Store details stay in the logs, not in the response body.
            AppError::StoreUnavailable(_) | AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error. Please try again.".to_string(),
            ),
        }
    }
}

fn error_resp(status: StatusCode, message: String) -> Response {
    let body = serde_json::json!({ "success": false, "error": message });
    (status, Json(body)).into_response()
}
