//! Scalar coercion of bound arguments.
//!
//! Each `ParamType` has its own coercion function. A scalar is converted by
//! taking its string form, converting that string to the target type and
//! converting the result back; if the round trip changes the string, the
//! conversion would lose data and the value is rejected.

use crate::value::{format_float, ParamType, ParamValue};

/// Coercion failure: the value cannot represent the expected type without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: ParamType,
}

pub type CoercionResult = Result<ParamValue, TypeMismatch>;

/// Coerce `value` to `expected`. `Null` always passes through untouched.
pub fn coerce(value: &ParamValue, expected: ParamType) -> CoercionResult {
    if value.is_null() {
        return Ok(ParamValue::Null);
    }
    match expected {
        ParamType::Array => coerce_array(value),
        ParamType::Untyped => coerce_untyped(value),
        ParamType::Boolean => with_scalar(value, expected, coerce_boolean),
        ParamType::Integer => with_scalar(value, expected, coerce_integer),
        ParamType::Float => with_scalar(value, expected, coerce_float),
        ParamType::String => with_scalar(value, expected, coerce_string),
    }
}

fn coerce_array(value: &ParamValue) -> CoercionResult {
    match value {
        ParamValue::Array(_) => Ok(value.clone()),
        _ => Err(TypeMismatch {
            expected: ParamType::Array,
        }),
    }
}

fn coerce_untyped(value: &ParamValue) -> CoercionResult {
    if value.is_scalar() {
        Ok(value.clone())
    } else {
        Err(TypeMismatch {
            expected: ParamType::Untyped,
        })
    }
}

/// Run a string-based coercion on the value's canonical string form.
fn with_scalar(
    value: &ParamValue,
    expected: ParamType,
    convert: fn(&str) -> Option<ParamValue>,
) -> CoercionResult {
    canonical_form(value)
        .and_then(|form| convert(&form))
        .ok_or(TypeMismatch { expected })
}

/// String form used for the round-trip check; `false` reads as `"0"` here.
fn canonical_form(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Bool(false) => Some("0".to_string()),
        ParamValue::Array(_) | ParamValue::Null => None,
        other => other.scalar_string(),
    }
}

fn coerce_boolean(form: &str) -> Option<ParamValue> {
    match form {
        "0" => Some(ParamValue::Bool(false)),
        "1" => Some(ParamValue::Bool(true)),
        _ => None,
    }
}

fn coerce_integer(form: &str) -> Option<ParamValue> {
    let parsed = form.parse::<i64>().ok()?;
    (parsed.to_string() == form).then_some(ParamValue::Int(parsed))
}

fn coerce_float(form: &str) -> Option<ParamValue> {
    let parsed = form.parse::<f64>().ok().filter(|f| f.is_finite())?;
    (format_float(parsed) == form).then_some(ParamValue::Float(parsed))
}

fn coerce_string(form: &str) -> Option<ParamValue> {
    Some(ParamValue::Str(form.to_string()))
}
