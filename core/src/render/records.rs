// Record field access
//
// Resolved records are caller-defined JSON values. Strategies only look at
// the fields a widget binds; everything else passes through untouched.

use chrono::DateTime;
use serde_json::Value;

pub(crate) fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.as_object()?.get(name).filter(|v| !v.is_null())
}

/// Numeric reading of `name`. A bare number record is its own value.
pub(crate) fn number(record: &Value, name: &str) -> Option<f64> {
    let raw = match record {
        Value::Number(_) => record,
        _ => field(record, name)?,
    };
    let n = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

pub(crate) fn text(record: &Value, name: &str) -> Option<String> {
    match field(record, name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// X-axis position: a number, or an RFC 3339 timestamp as epoch millis.
pub(crate) fn axis_value(record: &Value, name: &str) -> Option<f64> {
    if let Some(n) = number(record, name) {
        return Some(n);
    }
    match field(record, name)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.timestamp_millis() as f64),
        _ => None,
    }
}

/// Values of a link field, accepting a list or a single id.
pub(crate) fn id_list(record: &Value, name: &str) -> Vec<String> {
    match field(record, name) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(Value::Number(n)) => vec![n.to_string()],
        _ => Vec::new(),
    }
}

/// Column names in first-seen order across records.
pub(crate) fn columns(records: &[Value], scalar_column: &str) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        match record.as_object() {
            Some(map) => {
                for key in map.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
            None => {
                if !columns.iter().any(|c| c == scalar_column) {
                    columns.push(scalar_column.to_string());
                }
            }
        }
    }
    columns
}

/// Cell of `column`, or the record itself for scalar records.
pub(crate) fn cell(record: &Value, column: &str, scalar_column: &str) -> Value {
    match record.as_object() {
        Some(map) => map.get(column).cloned().unwrap_or(Value::Null),
        None if column == scalar_column => record.clone(),
        None => Value::Null,
    }
}
