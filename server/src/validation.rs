//! Payload validation for create and update requests.
//!
//! Bodies are inspected as raw JSON so each rejection can name the offending
//! field. Text is measured after trimming, in Unicode scalar values.

use serde_json::{Map, Value};

use crate::store::TodoPatch;

pub const MAX_TEXT_LEN: usize = 100;

const ALLOWED_FIELDS: [&str; 2] = ["text", "completed"];

/// Human-readable reason a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Validate a create payload and return the trimmed text to store.
///
/// `completed` is accepted but ignored; new todos always start open.
pub fn validate_create(body: &Value) -> Result<String, ValidationError> {
    let fields = as_object(body)?;
    reject_unknown(fields)?;
    let text = match fields.get("text") {
        Some(value) => validate_text(value)?,
        None => return Err(ValidationError("\"text\" is required".to_string())),
    };
    if let Some(value) = fields.get("completed") {
        validate_completed(value)?;
    }
    Ok(text)
}

/// Validate an update payload. Every field is optional.
pub fn validate_update(body: &Value) -> Result<TodoPatch, ValidationError> {
    let fields = as_object(body)?;
    reject_unknown(fields)?;
    let text = fields.get("text").map(validate_text).transpose()?;
    let completed = fields
        .get("completed")
        .map(validate_completed)
        .transpose()?;
    Ok(TodoPatch { text, completed })
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError("Request body must be a JSON object".to_string()))
}

fn reject_unknown(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    match fields.keys().find(|k| !ALLOWED_FIELDS.contains(&k.as_str())) {
        Some(key) => Err(ValidationError(format!("\"{key}\" is not allowed"))),
        None => Ok(()),
    }
}

fn validate_text(value: &Value) -> Result<String, ValidationError> {
    let Some(raw) = value.as_str() else {
        return Err(ValidationError("\"text\" must be a string".to_string()));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(
            "\"text\" is not allowed to be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError(format!(
            "\"text\" length must be less than or equal to {MAX_TEXT_LEN} characters long"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_completed(value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError("\"completed\" must be a boolean".to_string()))
}
