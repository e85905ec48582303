use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use super::{FieldKind, FieldSpec, ResourceSchema, ValidatedRecord};
use crate::backend::SqlValue;
use crate::error::{AppError, AppResult};

pub const MISSING_FIELDS: &str = "Missing required fields.";

/// Loose truthiness used for required fields: null, false, zero, the empty
/// string and absent keys all count as missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Look up a field by its name, then by its aliases
pub fn lookup<'a>(body: &'a Map<String, Value>, field: &FieldSpec) -> Option<&'a Value> {
    body.get(field.name).or_else(|| {
        field
            .aliases
            .iter()
            .find_map(|alias| body.get(*alias))
    })
}

/// Validate a request body against a schema.
///
/// Presence of every required field is checked before any value is coerced,
/// so a body missing a field always reports [`MISSING_FIELDS`].
pub fn validate_record(schema: &ResourceSchema, body: &Value) -> AppResult<ValidatedRecord> {
    let object = body.as_object().ok_or_else(|| {
        AppError::BadRequest("Request body must be a JSON object".to_string())
    })?;

    let missing: Vec<&str> = schema
        .fields
        .iter()
        .filter(|field| field.required && !is_present(lookup(object, field)))
        .map(|field| field.name)
        .collect();
    if !missing.is_empty() {
        tracing::debug!(resource = schema.name, missing = ?missing, "Rejected incomplete body");
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    }

    let mut values = Vec::with_capacity(schema.fields.len());
    let mut references = Vec::new();

    for field in schema.fields {
        let value = match lookup(object, field) {
            Some(raw) if !raw.is_null() => coerce(field, raw)?,
            _ => SqlValue::Null,
        };

        if let (Some(reference), SqlValue::Integer(id)) = (field.references, &value) {
            references.push((reference, *id));
        }
        values.push(value);
    }

    Ok(ValidatedRecord { values, references })
}

/// Coerce a JSON value to the declared kind of a field
pub fn coerce(field: &FieldSpec, value: &Value) -> AppResult<SqlValue> {
    let coerced = match field.kind {
        FieldKind::Integer => as_integer(value).map(SqlValue::Integer),
        FieldKind::Identifier => as_integer(value)
            .filter(|id| *id > 0)
            .map(SqlValue::Integer),
        FieldKind::Decimal => as_decimal(value).map(SqlValue::Decimal),
        FieldKind::Text => as_text(value).map(SqlValue::Text),
        FieldKind::Date => value.as_str().and_then(parse_date).map(SqlValue::Date),
    };

    coerced.ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid value for field '{}': expected {}",
            field.name,
            field.kind.describe()
        ))
    })
}

/// 2^63, the first float that no longer fits in an i64
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().and_then(whole_float),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Some(i),
                Err(e) if is_overflow(&e) => None,
                Err(_) => s.parse::<f64>().ok().and_then(whole_float),
            }
        }
        _ => None,
    }
}

fn is_overflow(err: &std::num::ParseIntError) -> bool {
    matches!(
        err.kind(),
        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow
    )
}

/// Whole floats within the i64 range, anything else is rejected
fn whole_float(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&f)).then(|| f as i64)
}

fn as_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
