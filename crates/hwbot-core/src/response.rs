//! Shape checks for the review API response.
//!
//! The API answers `{"current_date": <int>, "homeworks": [<record>, ...]}`
//! with records ordered most-recent-first. Only the envelope is validated
//! here; record fields are checked by `status::parse_status`.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::HwError;

/// Server reference timestamp key.
pub const CURRENT_DATE: &str = "current_date";
/// Submission list key.
pub const HOMEWORKS: &str = "homeworks";

/// Validate the response envelope and return its submission records.
///
/// The records are returned as-is and in server order. An empty list is not
/// an error.
pub fn check_response(response: &Value) -> Result<&[Value], HwError> {
    let map = response.as_object().ok_or_else(|| {
        HwError::TypeMismatch(format!(
            "API response is not a mapping (got {})",
            kind(response)
        ))
    })?;

    if !map.contains_key(CURRENT_DATE) || !map.contains_key(HOMEWORKS) {
        error!("expected keys are missing from the API response");
        return Err(HwError::MissingKey(format!(
            "API response must contain `{CURRENT_DATE}` and `{HOMEWORKS}`"
        )));
    }

    let homeworks = map[HOMEWORKS].as_array().ok_or_else(|| {
        HwError::TypeMismatch(format!(
            "`{HOMEWORKS}` is not a list (got {})",
            kind(&map[HOMEWORKS])
        ))
    })?;

    if homeworks.is_empty() {
        debug!("homework list is empty");
    }

    Ok(homeworks)
}

/// Server `current_date` of a response, if present and integral.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE).and_then(Value::as_i64)
}

/// JSON type name for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
