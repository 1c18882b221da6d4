use serde_json::{Map, Value};
use thiserror::Error;

use crate::shared::detection::{Detection, DetectionError};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("detection document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("detection document must be an array or an object with a `faces` array")]
    NoEntries,
}

/// Extracts the raw entry list from a JSON document.
///
/// Accepts a bare array, or an object carrying the array under `faces`.
pub fn parse_document(text: &str) -> Result<Vec<Value>, DocumentError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut obj) => match obj.remove("faces") {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Err(DocumentError::NoEntries),
        },
        _ => Err(DocumentError::NoEntries),
    }
}

/// Converts loosely-typed entries into detections.
///
/// Malformed entries are dropped one by one; they never fail the batch.
pub fn parse_entries(entries: &[Value]) -> Vec<Detection> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match parse_entry(entry) {
            Ok(d) => Some(d),
            Err(e) => {
                log::debug!("Dropping detection entry {i}: {e}");
                None
            }
        })
        .collect()
}

pub fn parse_entry(entry: &Value) -> Result<Detection, DetectionError> {
    let obj = entry.as_object().ok_or(DetectionError::NotAnObject)?;
    Detection::new(
        number(obj, "x")? as f32,
        number(obj, "y")? as f32,
        number(obj, "width")? as f32,
        number(obj, "height")? as f32,
        millis(obj, "startTimeMs")?,
        millis(obj, "endTimeMs")?,
    )
}

fn number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, DetectionError> {
    obj.get(field)
        .ok_or(DetectionError::MissingField(field))?
        .as_f64()
        .ok_or(DetectionError::NotANumber(field))
}

/// Integers pass through exactly; fractional values truncate toward zero.
fn millis(obj: &Map<String, Value>, field: &'static str) -> Result<i64, DetectionError> {
    let value = obj.get(field).ok_or(DetectionError::MissingField(field))?;
    if let Some(ms) = value.as_i64() {
        return Ok(ms);
    }
    match value.as_f64() {
        Some(ms) if ms.is_finite() => Ok(ms.trunc() as i64),
        _ => Err(DetectionError::NotANumber(field)),
    }
}
