use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flashdeck_algo::AlgoError;
use serde::Serialize;

use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

/// Envelope for successful responses. `persisted` is false when the change
/// is live in memory but the document could not be written.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    Json(SuccessResponse {
        success: true,
        data,
        persisted: None,
    })
    .into_response()
}

pub fn ok_persisted<T: Serialize>(data: T, persisted: bool) -> Response {
    Json(SuccessResponse {
        success: true,
        data,
        persisted: Some(persisted),
    })
    .into_response()
}

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
    is_operational: bool,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            is_operational: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn operational(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            is_operational: true,
        }
    }
}

impl From<AlgoError> for AppError {
    fn from(err: AlgoError) -> Self {
        match err {
            AlgoError::InvalidInput(_) => Self::validation(err.to_string()),
            AlgoError::DeckNotFound(_) | AlgoError::CardNotFound { .. } => {
                Self::not_found(err.to_string())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::not_found(err.to_string()),
            StoreError::Parse(_) => Self::validation(err.to_string()),
            StoreError::Io(_) => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_operational {
            self.message
        } else {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
            "internal server error".to_string()
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: self.code,
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algo_error_mapping() {
        assert_eq!(
            AppError::from(AlgoError::invalid("bad grade")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AlgoError::DeckNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(AlgoError::CardNotFound {
                deck: "x".into(),
                card_id: 1
            })
            .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_io_error_is_internal() {
        let err = StoreError::Io(std::io::Error::other("disk full"));
        assert_eq!(AppError::from(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
