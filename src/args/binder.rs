//! Binds a call's positional and keyword arguments to declared parameters.
//!
//! Binding order:
//! 1. Positional arguments fill fixed parameters left to right.
//! 2. Extra positionals go to the variadic tail, if the signature has one.
//! 3. Keyword arguments fill parameters by name.
//! 4. Omitted parameters take their declared default.
//! 5. A required parameter left unfilled is an error.
use super::signature::Signature;
use super::value::{ArgValue, CallArgs};
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("{op}() missing required argument: '{param}'")]
    MissingArgument { op: String, param: String },
    #[error("{op}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { op: String, keyword: String },
    #[error("{op}() got multiple values for argument '{param}'")]
    MultipleValues { op: String, param: String },
    #[error("{op}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional { op: String, expected: usize, given: usize },
}

/// The default-filled arguments of one call, in declared parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgs {
    values: SmallVec<[(&'static str, ArgValue); 4]>,
}

impl ResolvedArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ArgValue)> {
        self.values.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolves `call` against `sig`. Neither input is modified.
pub fn bind(sig: &Signature, call: &CallArgs) -> Result<ResolvedArgs, BindingError> {
    let fixed = sig.fixed_len();
    let mut slots: SmallVec<[Option<ArgValue>; 4]> = SmallVec::from_elem(None, sig.params.len());

    // --- Positional ---
    let (head, rest) = call.positional.split_at(call.positional.len().min(fixed));
    for (slot, value) in slots.iter_mut().zip(head) {
        *slot = Some(value.clone());
    }
    if sig.variadic_tail().is_some() {
        slots[fixed] = Some(ArgValue::Sequence(rest.to_vec()));
    } else if !rest.is_empty() {
        return Err(BindingError::TooManyPositional {
            op: sig.op_name.to_string(),
            expected: fixed,
            given: call.positional.len(),
        });
    }

    // --- Keyword ---
    for (keyword, value) in &call.named {
        let idx = match sig.position(keyword) {
            Some(idx) if !sig.params[idx].variadic => idx,
            _ => {
                return Err(BindingError::UnexpectedKeyword {
                    op: sig.op_name.to_string(),
                    keyword: keyword.clone(),
                })
            }
        };
        if slots[idx].is_some() {
            return Err(BindingError::MultipleValues {
                op: sig.op_name.to_string(),
                param: keyword.clone(),
            });
        }
        slots[idx] = Some(value.clone());
    }

    // --- Defaults ---
    let mut values = SmallVec::with_capacity(sig.params.len());
    for (param, slot) in sig.params.iter().zip(slots) {
        let value = match (slot, &param.default) {
            (Some(v), _) => v,
            (None, Some(default)) => default.clone(),
            (None, None) => {
                return Err(BindingError::MissingArgument {
                    op: sig.op_name.to_string(),
                    param: param.name.to_string(),
                })
            }
        };
        values.push((param.name, value));
    }

    Ok(ResolvedArgs { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::signature::Param;
    use rstest::rstest;

    fn pad_end() -> Signature {
        Signature::new(
            "PadEnd",
            vec![Param::required("pad_shape"), Param::optional("pad_value", ArgValue::Absent)],
        )
    }

    fn slice() -> Signature {
        Signature::new("Slice", vec![Param::variadic("slices")])
    }

    #[test]
    fn test_positional_and_default() {
        let call = CallArgs::new().arg(ArgValue::list([ArgValue::Integer(3)]));
        let resolved = bind(&pad_end(), &call).unwrap();
        let names: Vec<&str> = resolved.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["pad_shape", "pad_value"]);
        assert_eq!(resolved.get("pad_value"), Some(&ArgValue::Absent));
    }

    #[test]
    fn test_keyword_fills_by_name_in_declared_order() {
        let call = CallArgs::new()
            .kwarg("pad_value", 0)
            .kwarg("pad_shape", ArgValue::list([ArgValue::Integer(1)]));
        let resolved = bind(&pad_end(), &call).unwrap();
        let values: Vec<&ArgValue> = resolved.iter().map(|(_, v)| v).collect();
        assert_eq!(values[1], &ArgValue::Integer(0));
    }

    #[rstest]
    #[case(CallArgs::new(), "missing required argument: 'pad_shape'")]
    #[case(CallArgs::new().arg(1).kwarg("pad_shape", 2), "multiple values for argument 'pad_shape'")]
    #[case(CallArgs::new().arg(1).kwarg("pad_width", 2), "unexpected keyword argument 'pad_width'")]
    #[case(CallArgs::new().arg(1).arg(2).arg(3), "takes 2 positional arguments but 3 were given")]
    #[case(CallArgs::new().kwarg("pad_shape", 1).kwarg("pad_shape", 2), "multiple values for argument 'pad_shape'")]
    fn test_binding_errors(#[case] call: CallArgs, #[case] expected: &str) {
        let err = bind(&pad_end(), &call).unwrap_err();
        assert!(err.to_string().contains(expected), "got: {}", err);
        assert!(err.to_string().starts_with("PadEnd()"));
    }

    #[test]
    fn test_variadic_collects_remaining_positionals() {
        let call = CallArgs::new().arg(1).arg(ArgValue::Ellipsis).arg(ArgValue::Absent);
        let resolved = bind(&slice(), &call).unwrap();
        assert_eq!(
            resolved.get("slices"),
            Some(&ArgValue::list([ArgValue::Integer(1), ArgValue::Ellipsis, ArgValue::Absent]))
        );
    }

    #[test]
    fn test_variadic_without_arguments_is_empty_sequence() {
        let resolved = bind(&slice(), &CallArgs::new()).unwrap();
        assert_eq!(resolved.get("slices"), Some(&ArgValue::Sequence(vec![])));
    }

    #[test]
    fn test_variadic_cannot_be_named() {
        let call = CallArgs::new().kwarg("slices", 1);
        assert!(matches!(bind(&slice(), &call), Err(BindingError::UnexpectedKeyword { .. })));
    }

    #[test]
    fn test_binding_does_not_touch_inputs() {
        let sig = pad_end();
        let call = CallArgs::new().arg(ArgValue::list([ArgValue::Integer(2)]));
        let before = (sig.clone(), call.clone());
        let _ = bind(&sig, &call).unwrap();
        assert_eq!((sig, call), before);
    }
}
