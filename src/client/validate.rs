//! Shape validation for decoded status responses

use serde_json::Value;
use tracing::info;

use super::error::{ClientError, Result};

/// A status response whose envelope has been checked
///
/// Homework entries are passed through untouched; requiring their inner
/// keys is the status parser's job.
#[derive(Debug, Clone)]
pub struct StatusPayload {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Check the envelope of a decoded API response.
///
/// The checks run in a fixed order: the response must be a JSON object,
/// must carry a `homeworks` key, must report an integer `current_date`
/// cursor, and `homeworks` must be a list. The cursor check precedes the
/// list check, so a response that fails both reports the missing cursor.
pub fn check_response(response: &Value) -> Result<StatusPayload> {
    let object = response
        .as_object()
        .ok_or(ClientError::ResponseNotAnObject)?;

    let homeworks = object.get("homeworks").ok_or(ClientError::HomeworksMissing)?;

    let current_date = object
        .get("current_date")
        .and_then(Value::as_i64)
        .ok_or(ClientError::CursorMissing)?;

    let homeworks = homeworks
        .as_array()
        .ok_or(ClientError::HomeworksNotAList)?
        .clone();

    info!(cursor = current_date, "status response accepted");

    Ok(StatusPayload {
        homeworks,
        current_date,
    })
}
