use actix_web::{error, error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use crate::models::ErrorResponse;

/// Errors returned to API clients as JSON
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Candidate pool has {size} institutions, limit is {limit}")]
    PoolTooLarge { size: usize, limit: usize },
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::PoolTooLarge { .. } => "pool_too_large",
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_too_large_status() {
        let err = ApiError::PoolTooLarge { size: 2000, limit: 1000 };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_body();
        assert_eq!(body.error, "pool_too_large");
        assert_eq!(body.status_code, 400);
        assert!(body.message.contains("2000"));
    }

    #[test]
    fn test_invalid_json_is_bad_request() {
        let err = ApiError::InvalidJson("expected value".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_body().error, "invalid_json");
    }
}
