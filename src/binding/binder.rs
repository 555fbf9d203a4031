//! Conversion of positional call arguments into named parameters.
//!
//! # Binding Algorithm
//!
//! Parameters are visited in declaration order with a cursor over the
//! positional arguments:
//! 1. A positional argument at the cursor is renamed to the parameter
//! 2. Otherwise an existing named argument is kept
//! 3. Otherwise a supplemental value is copied in
//! 4. Otherwise the parameter is omitted
//!
//! Bound `null` values are dropped. Other values are elided when they equal
//! the parameter's default, and otherwise coerced to the expected type.
//! Positional arguments left over at the end mean the call supplied more
//! arguments than the member declares.

use crate::binding::args::ArgumentBag;
use crate::binding::coerce::coerce;
use crate::binding::signature::HandlerSignature;
use crate::errors::BindingError;
use crate::value::ParamValue;

/// Binds arguments against one handler member.
#[derive(Debug, Clone, Copy)]
pub struct ParameterBinder<'a> {
    handler: &'a str,
    method: &'a str,
    signature: &'a HandlerSignature,
}

impl<'a> ParameterBinder<'a> {
    /// `handler` and `method` only appear in error messages.
    pub fn new(handler: &'a str, method: &'a str, signature: &'a HandlerSignature) -> Self {
        Self {
            handler,
            method,
            signature,
        }
    }

    pub fn bind(&self, args: &ArgumentBag) -> Result<ArgumentBag, BindingError> {
        self.bind_with(args, &ArgumentBag::new())
    }

    /// Bind `args`, falling back to named entries of `supplemental` for
    /// parameters the call does not provide. Returns a new bag.
    pub fn bind_with(
        &self,
        args: &ArgumentBag,
        supplemental: &ArgumentBag,
    ) -> Result<ArgumentBag, BindingError> {
        let mut bound = args.clone();
        let mut cursor = 0;

        for (index, param) in self.signature.parameters().iter().enumerate() {
            let name = param.name.as_str();

            let value = if let Some(value) = bound.remove_position(cursor) {
                cursor += 1;
                value
            } else if let Some(value) = bound.get(name) {
                value.clone()
            } else if let Some(value) = supplemental.get(name) {
                value.clone()
            } else {
                continue;
            };

            let default = self.signature.comparison_default(index);
            if value.is_null() || value == *default {
                bound.remove_name(name);
                continue;
            }

            let expected = self.signature.expected_type(index);
            let coerced = coerce(&value, expected).map_err(|mismatch| {
                BindingError::InvalidValue {
                    parameter: name.to_string(),
                    handler: self.handler.to_string(),
                    method: self.method.to_string(),
                    expected: mismatch.expected.expectation_label().to_string(),
                }
            })?;

            if is_elidable(&coerced, default) {
                bound.remove_name(name);
            } else {
                bound.insert(name, coerced);
            }
        }

        let unconsumed = bound.positions().count();
        if unconsumed > 0 {
            return Err(BindingError::TooManyArguments {
                handler: self.handler.to_string(),
                method: self.method.to_string(),
                unconsumed,
            });
        }

        Ok(bound)
    }
}

/// A value need not be transmitted when it equals the default, or when there
/// is no default and the value is a scalar with an empty string form.
///
/// The empty-string rule applies regardless of the value's type, so `false`
/// and `""` are both dropped for parameters without a default.
fn is_elidable(value: &ParamValue, default: &ParamValue) -> bool {
    if value == default {
        return true;
    }
    default.is_null()
        && value.is_scalar()
        && value.scalar_string().is_some_and(|s| s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::signature::ParameterSpec;
    use pretty_assertions::assert_eq;

    fn signature(params: Vec<ParameterSpec>) -> HandlerSignature {
        HandlerSignature::new(params).unwrap()
    }

    fn bind(sig: &HandlerSignature, args: &ArgumentBag) -> Result<ArgumentBag, BindingError> {
        ParameterBinder::new("ProductPresenter", "actionShow", sig).bind(args)
    }

    #[test]
    fn test_positional_argument_becomes_named() {
        let sig = signature(vec![ParameterSpec::required("id")]);
        let bound = bind(&sig, &ArgumentBag::positional([42])).unwrap();
        assert_eq!(bound, ArgumentBag::new().with("id", 42));
    }

    #[test]
    fn test_empty_signature_with_no_args_binds_to_empty() {
        let bound = bind(&HandlerSignature::empty(), &ArgumentBag::new()).unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn test_too_many_positional_arguments() {
        let sig = signature(vec![ParameterSpec::required("id")]);
        let err = bind(&sig, &ArgumentBag::positional([1, 2])).unwrap_err();
        assert_eq!(
            err,
            BindingError::TooManyArguments {
                handler: "ProductPresenter".into(),
                method: "actionShow".into(),
                unconsumed: 1,
            }
        );
    }

    #[test]
    fn test_stray_position_is_rejected() {
        let sig = signature(vec![ParameterSpec::required("id")]);
        let args = ArgumentBag::positional([1]).with(5usize, "x");
        assert!(matches!(
            bind(&sig, &args),
            Err(BindingError::TooManyArguments { unconsumed: 1, .. })
        ));
    }

    #[test]
    fn test_named_arguments_pass_through() {
        let sig = signature(vec![
            ParameterSpec::required("id"),
            ParameterSpec::with_default("page", 1),
        ]);
        let args = ArgumentBag::positional([7]).with("page", 3).with("extra", "x");
        let bound = bind(&sig, &args).unwrap();
        assert_eq!(
            bound,
            ArgumentBag::new()
                .with("id", 7)
                .with("page", 3)
                .with("extra", "x")
        );
    }

    #[test]
    fn test_positional_wins_over_named_for_same_parameter() {
        let sig = signature(vec![ParameterSpec::required("id")]);
        let args = ArgumentBag::positional([1]).with("id", 2);
        assert_eq!(bind(&sig, &args).unwrap(), ArgumentBag::new().with("id", 1));
    }

    #[test]
    fn test_supplemental_values_fill_gaps_only() {
        let sig = signature(vec![
            ParameterSpec::required("id"),
            ParameterSpec::required("lang"),
        ]);
        let supplemental = ArgumentBag::new().with("lang", "cs").with("id", 99);
        let bound = ParameterBinder::new("P", "renderDefault", &sig)
            .bind_with(&ArgumentBag::positional([5]), &supplemental)
            .unwrap();
        assert_eq!(bound, ArgumentBag::new().with("id", 5).with("lang", "cs"));
    }

    #[test]
    fn test_parameters_without_source_are_omitted() {
        let sig = signature(vec![
            ParameterSpec::required("id"),
            ParameterSpec::with_default("page", 1),
        ]);
        let bound = bind(&sig, &ArgumentBag::new()).unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn test_default_valued_arguments_are_elided() {
        let sig = signature(vec![
            ParameterSpec::required("id"),
            ParameterSpec::with_default("page", 1),
        ]);
        let bound = bind(&sig, &ArgumentBag::positional([10, 1])).unwrap();
        assert_eq!(bound, ArgumentBag::new().with("id", 10));
    }

    #[test]
    fn test_numeric_string_coerced_then_elided() {
        let sig = signature(vec![ParameterSpec::with_default("page", 1)]);
        let bound = bind(&sig, &ArgumentBag::new().with("page", "1")).unwrap();
        assert!(bound.is_empty());

        let bound = bind(&sig, &ArgumentBag::new().with("page", "2")).unwrap();
        assert_eq!(bound, ArgumentBag::new().with("page", 2));
    }

    #[test]
    fn test_empty_scalars_elided_without_default() {
        let sig = signature(vec![
            ParameterSpec::required("q"),
            ParameterSpec::required("flag"),
        ]);
        let args = ArgumentBag::positional([ParamValue::from(""), false.into()]);
        let bound = bind(&sig, &args).unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn test_null_arguments_are_dropped_unchecked() {
        let sig = signature(vec![ParameterSpec::with_default("page", 1)]);
        let bound = bind(&sig, &ArgumentBag::positional([ParamValue::Null])).unwrap();
        assert!(bound.is_empty());

        let bound = bind(&sig, &ArgumentBag::new().with("page", ParamValue::Null)).unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn test_null_default_matches_omitted_argument() {
        let sig = signature(vec![
            ParameterSpec::with_default("page", 1),
            ParameterSpec::nullable("q"),
        ]);
        let args = ArgumentBag::positional([ParamValue::from(1), ParamValue::Null]);
        let explicit = bind(&sig, &args).unwrap();
        let omitted = bind(&sig, &ArgumentBag::positional([1])).unwrap();
        assert_eq!(explicit, omitted);
        assert!(omitted.is_empty());
    }

    #[test]
    fn test_float_equal_to_default_is_elided_before_coercion() {
        let ratio = 0.1 + 0.2;
        let sig = signature(vec![ParameterSpec::with_default("ratio", ratio)]);
        let bound = bind(&sig, &ArgumentBag::positional([ratio])).unwrap();
        assert!(bound.is_empty());

        let bound = bind(&sig, &ArgumentBag::positional([0.5])).unwrap();
        assert_eq!(bound, ArgumentBag::new().with("ratio", 0.5));
    }

    #[test]
    fn test_invalid_value_names_parameter_and_type() {
        let sig = signature(vec![ParameterSpec::with_default("page", 1)]);
        let err = bind(&sig, &ArgumentBag::positional(["abc"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter 'page' in method ProductPresenter::actionShow(), expected integer."
        );
    }

    #[test]
    fn test_array_for_untyped_parameter_reports_scalar() {
        let sig = signature(vec![ParameterSpec::required("id")]);
        let err = bind(&sig, &ArgumentBag::positional([ParamValue::list([1])])).unwrap_err();
        assert!(matches!(
            err,
            BindingError::InvalidValue { ref expected, .. } if expected == "scalar"
        ));
    }

    #[test]
    fn test_array_hint_requires_array() {
        let no_tags = ParamValue::list(Vec::<i64>::new());
        let sig = signature(vec![ParameterSpec::array("tags", Some(no_tags))]);
        assert!(bind(&sig, &ArgumentBag::positional(["a"])).is_err());

        let empty = bind(&sig, &ArgumentBag::positional([ParamValue::list(Vec::<i64>::new())]))
            .unwrap();
        assert!(empty.is_empty());

        let tags = ParamValue::list(["a", "b"]);
        let bound = bind(&sig, &ArgumentBag::positional([tags.clone()])).unwrap();
        assert_eq!(bound, ArgumentBag::new().with("tags", tags));
    }

    #[test]
    fn test_non_optional_default_compares_against_null() {
        let sig = signature(vec![
            ParameterSpec::with_default("page", 1),
            ParameterSpec::required("id"),
        ]);
        let bound = bind(&sig, &ArgumentBag::positional([1, 5])).unwrap();
        assert_eq!(bound, ArgumentBag::new().with("page", 1).with("id", 5));
    }

    #[test]
    fn test_input_bag_is_not_mutated() {
        let sig = signature(vec![ParameterSpec::required("id")]);
        let args = ArgumentBag::positional([3]);
        let _ = bind(&sig, &args).unwrap();
        assert_eq!(args, ArgumentBag::positional([3]));
    }
}
