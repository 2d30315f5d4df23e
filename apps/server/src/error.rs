use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calcae_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Core(e) = &self;
        let status = match e {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Storage(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = e.to_string();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use calcae_core::errors::{StorageError, ValidationError};

    #[test]
    fn test_core_errors_map_to_status_codes() {
        let validation: ApiError =
            CoreError::from(ValidationError::InvalidInput("bad".to_string())).into();
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let storage: ApiError = CoreError::from(StorageError::WriteFailed {
            path: "settings.json".to_string(),
            reason: "read-only".to_string(),
        })
        .into();
        assert_eq!(
            storage.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unexpected_error_is_internal() {
        let error: ApiError = CoreError::Unexpected("lock poisoned".to_string()).into();
        assert_eq!(error.to_string(), "Unexpected error: lock poisoned");
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
