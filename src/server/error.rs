//! HTTP error mapping for the request handlers.

use super::types::{ErrorResponse, PredictionErrorResponse, StatusErrorResponse};
use crate::prediction::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

pub const PREDICTION_FAILED: &str = "Có lỗi xảy ra khi xử lý dự đoán. Vui lòng thử lại sau.";
pub const CONNECTION_FAILED: &str = "Lỗi kết nối máy chủ. Vui lòng thử lại sau.";
pub const PAYLOAD_TOO_LARGE: &str = "Dữ liệu gửi lên vượt quá kích thước cho phép";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete client input (400).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Request body over `server.max_body_bytes` (413).
    #[error("Payload too large: limit is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Any other failure while serving `/predict` (500).
    #[error("Error in prediction: {cause}")]
    Prediction {
        cause: anyhow::Error,
        /// Whether `cause` is echoed back to the client.
        debug: bool,
    },

    /// Failure while serving `/test` (500).
    #[error("Error in server test: {0}")]
    Connection(anyhow::Error),
}

impl ApiError {
    pub fn prediction(cause: impl Into<anyhow::Error>, debug: bool) -> Self {
        Self::Prediction {
            cause: cause.into(),
            debug,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => {
                error!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::PayloadTooLarge { limit } => {
                error!("Validation error: request body exceeds {} bytes", limit);
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(ErrorResponse {
                        error: PAYLOAD_TOO_LARGE.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::Prediction { cause, debug } => {
                error!("Error in prediction: {}", cause);
                error!("Error details:\n{:?}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(PredictionErrorResponse {
                        error: PREDICTION_FAILED.to_string(),
                        details: debug.then(|| cause.to_string()),
                    }),
                )
                    .into_response()
            }
            ApiError::Connection(source) => {
                error!("Error in server test: {:?}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(StatusErrorResponse {
                        status: "error".to_string(),
                        error: CONNECTION_FAILED.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
