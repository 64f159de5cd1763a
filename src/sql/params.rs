//! Convert request JSON into bind parameters.
//!
//! Attribute values are bound as text and cast by the statement to the column's catalog type, so
//! every scalar JSON value reduces to `Option<String>`.

use crate::error::AppError;
use serde_json::Value;

/// One bind parameter: `None` binds SQL NULL.
pub type TextParam = Option<String>;

/// Scalar JSON to text. Arrays and objects have no column representation.
pub fn scalar_to_param(column: &str, v: &Value) -> Result<TextParam, AppError> {
    Ok(match v {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => {
            return Err(AppError::Validation(format!("{} must be a scalar value", column)))
        }
    })
}

/// Integer identifier sent either as a JSON number or as a string of digits.
pub fn value_to_id(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
