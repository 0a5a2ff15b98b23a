//! API error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rfplens_core::error::RfpLensError;
use serde::Serialize;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error wrapper translating core errors into HTTP responses
#[derive(Debug)]
pub struct ApiError(pub RfpLensError);

impl From<RfpLensError> for ApiError {
    fn from(err: RfpLensError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RfpLensError::InvalidInput(_) | RfpLensError::Parse(_) => StatusCode::BAD_REQUEST,
            RfpLensError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            RfpLensError::ModelTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RfpLensError::RetrievalUnavailable(_)
            | RfpLensError::ModelUnavailable(_)
            | RfpLensError::ModelRefusal(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: RfpLensError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_collaborator_failures_map_to_gateway_errors() {
        assert_eq!(
            status_of(RfpLensError::RetrievalUnavailable("down".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(RfpLensError::ModelTimeout { seconds: 30 }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(RfpLensError::ModelRefusal("empty".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        assert_eq!(
            status_of(RfpLensError::InvalidInput("not a pdf".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
