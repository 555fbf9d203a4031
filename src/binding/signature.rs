//! Statically declared handler signatures.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::errors::SignatureError;
use crate::value::{ParamType, ParamValue};

static NO_DEFAULT: ParamValue = ParamValue::Null;

/// One declared parameter of a handler member.
///
/// In configuration a `null` default is written either as `default = null`
/// (JSON) or as `optional = true`, since TOML has no null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParameterDecl")]
pub struct ParameterSpec {
    pub name: String,
    /// Declared default value, if any. `Some(Null)` is a declared `null` default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    /// Only `Array` changes the expected type; scalar types are inferred from the default.
    #[serde(rename = "type")]
    pub declared_type: ParamType,
}

/// Configuration form of a parameter declaration.
#[derive(Deserialize)]
struct ParameterDecl {
    name: String,
    #[serde(default, deserialize_with = "present_value")]
    default: Option<ParamValue>,
    #[serde(default)]
    optional: bool,
    #[serde(default = "untyped", rename = "type")]
    declared_type: ParamType,
}

impl From<ParameterDecl> for ParameterSpec {
    fn from(decl: ParameterDecl) -> Self {
        let default = match decl.default {
            Some(default) => Some(default),
            None if decl.optional => Some(ParamValue::Null),
            None => None,
        };
        Self {
            name: decl.name,
            default,
            declared_type: decl.declared_type,
        }
    }
}

/// A present field is a declared default even when it is `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<ParamValue>, D::Error>
where
    D: Deserializer<'de>,
{
    ParamValue::deserialize(deserializer).map(Some)
}

fn untyped() -> ParamType {
    ParamType::Untyped
}

impl ParameterSpec {
    /// Untyped parameter without a default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            declared_type: ParamType::Untyped,
        }
    }

    /// Parameter with a default value; its type is the type of the default.
    pub fn with_default(name: impl Into<String>, default: impl Into<ParamValue>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            declared_type: default.param_type(),
            default: Some(default),
        }
    }

    /// Untyped parameter whose default is `null`.
    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(ParamValue::Null),
            declared_type: ParamType::Untyped,
        }
    }

    /// Array-hinted parameter.
    pub fn array(name: impl Into<String>, default: Option<ParamValue>) -> Self {
        Self {
            name: name.into(),
            default,
            declared_type: ParamType::Array,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered parameter list of one handler member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandlerSignature {
    parameters: Vec<ParameterSpec>,
    /// Index of the first parameter from which every parameter has a default.
    optional_from: usize,
}

impl HandlerSignature {
    pub fn new(parameters: Vec<ParameterSpec>) -> Result<Self, SignatureError> {
        let mut seen = HashSet::new();
        for param in &parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter {
                    name: param.name.clone(),
                });
            }
        }

        let optional_from = parameters
            .iter()
            .rposition(|p| !p.has_default())
            .map_or(0, |last_required| last_required + 1);

        Ok(Self {
            parameters,
            optional_from,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// A parameter is optional when it and every later parameter declare a default.
    pub fn is_optional(&self, index: usize) -> bool {
        index >= self.optional_from && index < self.parameters.len()
    }

    /// Value a bound argument is compared against for elision.
    ///
    /// Defaults of non-optional parameters are ignored and yield `Null`.
    pub fn comparison_default(&self, index: usize) -> &ParamValue {
        match self.parameters.get(index).and_then(|p| p.default.as_ref()) {
            Some(default) if self.is_optional(index) => default,
            _ => &NO_DEFAULT,
        }
    }

    /// Type a bound argument is coerced to.
    pub fn expected_type(&self, index: usize) -> ParamType {
        match self.parameters.get(index) {
            Some(param) if param.declared_type == ParamType::Array => ParamType::Array,
            _ => self.comparison_default(index).param_type(),
        }
    }
}

impl TryFrom<Vec<ParameterSpec>> for HandlerSignature {
    type Error = SignatureError;

    fn try_from(parameters: Vec<ParameterSpec>) -> Result<Self, Self::Error> {
        Self::new(parameters)
    }
}
