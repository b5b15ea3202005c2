use super::{error::ApiError, types::HealthResponse};
use crate::prediction::{self, PredictionResponse};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{Html, Json},
};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Rendered landing page, loaded once at startup.
    pub home_page: Bytes,
    pub debug: bool,
    /// Enforced on `/predict` through `DefaultBodyLimit`.
    pub max_body_bytes: usize,
}

pub async fn home(State(state): State<AppState>) -> Html<Bytes> {
    info!("Accessing home page");
    Html(state.home_page)
}

pub async fn test_connection() -> Result<Json<HealthResponse>, ApiError> {
    info!("Testing server connection");
    Ok(Json(HealthResponse::running()))
}

pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    info!("Received prediction request");

    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                limit: state.max_body_bytes,
            }
        } else {
            ApiError::prediction(rejection, state.debug)
        }
    })?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let data = prediction::validate(content_type, &body)?;
    info!("Received data: {:?}", data.fields);

    let response = prediction::stub_prediction();
    info!("Sending test response");
    Ok(Json(response))
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
