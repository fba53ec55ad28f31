use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use devnet_service::Error;
use serde_json::json;

/// Wrapper mapping service errors onto HTTP responses. Bodies are
/// `{"detail": "..."}`, the shape API clients expect.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::SelfReference => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, format!("Not Found: {msg}")),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Error::Db(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
