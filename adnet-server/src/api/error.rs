//! Mapping from domain errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use adnet_types::PriorityError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Priority(#[from] PriorityError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Priority(PriorityError::InvalidCountryCode { .. }) => StatusCode::BAD_REQUEST,
            Self::Priority(PriorityError::StoreUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Priority(PriorityError::PartialBatchFailure { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Priority(err @ PriorityError::PartialBatchFailure { .. }) => json!({
                "error": err.to_string(),
                "failed": err.failed_countries(),
            }),
            Self::Priority(err) => json!({ "error": err.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!("[API] {}: {}", status, self);
        } else {
            tracing::debug!("[API] {}: {}", status, self);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adnet_types::BatchFailure;

    #[test]
    fn test_status_mapping() {
        let invalid = ApiError::from(PriorityError::InvalidCountryCode { code: "us".into() });
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let down = ApiError::from(PriorityError::StoreUnavailable { message: "down".into() });
        assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);

        let partial = ApiError::from(PriorityError::PartialBatchFailure {
            attempted: 2,
            failures: vec![BatchFailure { country: "BB".into(), message: "down".into() }],
        });
        assert_eq!(partial.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
