//! Human-readable rendering of parameters for diagnostics.
//!
//! The output reads like a decoded query string with `", "` between pairs:
//! `id=42, tags[0]=a, tags[1]=b`. Null values are skipped and booleans are
//! written as `1`/`0`.

use crate::binding::args::{ArgumentBag, ParamKey};
use crate::value::{format_float, ParamValue};

pub fn render_params(params: &ArgumentBag) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_pairs(&mut pairs, key.to_string(), value);
    }
    pairs.join(", ")
}

fn push_pairs(pairs: &mut Vec<String>, prefix: String, value: &ParamValue) {
    match value {
        ParamValue::Null => {}
        ParamValue::Bool(b) => pairs.push(format!("{prefix}={}", u8::from(*b))),
        ParamValue::Int(i) => pairs.push(format!("{prefix}={i}")),
        ParamValue::Float(f) => pairs.push(format!("{prefix}={}", format_float(*f))),
        ParamValue::Str(s) => pairs.push(format!("{prefix}={s}")),
        ParamValue::Array(items) => {
            for (key, item) in items {
                push_pairs(pairs, nested_key(&prefix, key), item);
            }
        }
    }
}

fn nested_key(prefix: &str, key: &ParamKey) -> String {
    format!("{prefix}[{key}]")
}
