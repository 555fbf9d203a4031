//! Parameter values passed through link generation.
//!
//! `ParamValue` is a closed set of value shapes a link parameter can take. The
//! string forms follow the loose scalar casting rules that the binding and
//! rendering code depend on (`true` is `"1"`, `false` is the empty string,
//! floats render with 14 significant digits).

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::binding::args::ParamKey;

/// Significant digits used when a float is turned into a string.
const FLOAT_PRECISION: usize = 14;

/// A single parameter value. `Null` doubles as the absence sentinel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(BTreeMap<ParamKey, ParamValue>),
}

/// Closed set of parameter types understood by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Array,
    Boolean,
    Integer,
    Float,
    String,
    /// No type information; any scalar is accepted.
    #[serde(alias = "none")]
    Untyped,
}

impl ParamType {
    /// Runtime type of a value. `Null` carries no type and maps to `Untyped`.
    pub fn of(value: &ParamValue) -> Self {
        match value {
            ParamValue::Null => ParamType::Untyped,
            ParamValue::Bool(_) => ParamType::Boolean,
            ParamValue::Int(_) => ParamType::Integer,
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Str(_) => ParamType::String,
            ParamValue::Array(_) => ParamType::Array,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Array => "array",
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::Float => "float",
            ParamType::String => "string",
            ParamType::Untyped => "untyped",
        }
    }

    /// Label used in diagnostics, where an untyped parameter expects "scalar".
    pub fn expectation_label(&self) -> &'static str {
        match self {
            ParamType::Untyped => "scalar",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Booleans, integers, floats and strings are scalars; null and arrays are not.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ParamValue::Bool(_) | ParamValue::Int(_) | ParamValue::Float(_) | ParamValue::Str(_)
        )
    }

    pub fn param_type(&self) -> ParamType {
        ParamType::of(self)
    }

    /// Loose string cast of a scalar. Returns `None` for arrays.
    ///
    /// `Null` and `false` both cast to the empty string.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            ParamValue::Null => Some(String::new()),
            ParamValue::Bool(true) => Some("1".to_string()),
            ParamValue::Bool(false) => Some(String::new()),
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::Float(f) => Some(format_float(*f)),
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&BTreeMap<ParamKey, ParamValue>> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Build an array value from a list, keyed by position.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        ParamValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ParamKey::Position(i), v.into()))
                .collect(),
        )
    }
}

/// Render a float with 14 significant digits, switching to `1.0E+25` notation
/// for very large or very small magnitudes.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // d.ddddddddddddde<exp>
    let sci = format!("{:.*e}", FLOAT_PRECISION - 1, value.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let (head, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{head}.{tail}E{exp_sign}{}", exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{zeros}")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<BTreeMap<ParamKey, ParamValue>> for ParamValue {
    fn from(value: BTreeMap<ParamKey, ParamValue>) -> Self {
        ParamValue::Array(value)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_unit(),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Int(i) => serializer.serialize_i64(*i),
            ParamValue::Float(f) => serializer.serialize_f64(*f),
            ParamValue::Str(s) => serializer.serialize_str(s),
            ParamValue::Array(items) if is_list(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for value in items.values() {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            ParamValue::Array(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for (key, value) in items {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
        }
    }
}

/// An array whose keys are exactly `0..len` serializes as a sequence.
fn is_list(items: &BTreeMap<ParamKey, ParamValue>) -> bool {
    items
        .keys()
        .enumerate()
        .all(|(i, key)| *key == ParamKey::Position(i))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
    Null,
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Null => ParamValue::Null,
            RawValue::Bool(b) => ParamValue::Bool(b),
            RawValue::Int(i) => ParamValue::Int(i),
            RawValue::Float(f) => ParamValue::Float(f),
            RawValue::Str(s) => ParamValue::Str(s),
            RawValue::List(items) => ParamValue::list(items),
            RawValue::Map(entries) => ParamValue::Array(
                entries
                    .into_iter()
                    .map(|(k, v)| (ParamKey::parse(&k), v))
                    .collect(),
            ),
        })
    }
}
