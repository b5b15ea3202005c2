//! Request validation and the placeholder prediction payload.
//!
//! No model is loaded: once a request carries every field in
//! [`REQUIRED_FIELDS`], [`stub_prediction`] is returned unchanged.

mod types;

pub use types::*;

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Fields a prediction request must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "Age",
    "Gender",
    "Years_at_Company",
    "Job_Role",
    "Monthly_Income",
];

/// Rejected client input. Always surfaced as HTTP 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Dữ liệu gửi lên phải ở định dạng JSON")]
    NotJson,

    #[error("Không nhận được dữ liệu")]
    NoData,

    #[error("Thiếu các trường dữ liệu: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Returns true for `application/json` and `application/*+json` media types.
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Validates a raw request body against the prediction contract.
///
/// Checks run in order and the first failure wins: JSON content type and
/// syntax, non-empty payload, then presence of every required field.
pub fn validate(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<PredictionRequest, ValidationError> {
    if !content_type.is_some_and(is_json_content_type) {
        return Err(ValidationError::NotJson);
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::NotJson)?;
    if is_empty(&value) {
        return Err(ValidationError::NoData);
    }

    let fields = match value {
        Value::Object(map) => map,
        // Only object keys count. An array is not searched for field names
        // and a scalar is not an error: both simply have no keys.
        _ => Default::default(),
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !fields.contains_key(*field))
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(PredictionRequest { fields })
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// The fixed payload returned for every valid request.
pub fn stub_prediction() -> PredictionResponse {
    let predictions = BTreeMap::from([
        ("Logistic Regression".to_string(), 0.3),
        ("Decision Tree".to_string(), 0.4),
    ]);

    PredictionResponse {
        predictions,
        best_model: BestModel {
            name: "Logistic Regression".to_string(),
            probability: 0.3,
        },
    }
}
