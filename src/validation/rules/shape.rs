//! Rules for structural shape: dimension lists, 1-D arrays, non-empty sequences.
use super::numeric::{as_integer, check_positive_bounded};
use crate::args::{ArgKind, ArgValue, KindSet};
use crate::config::GuardConfig;
use crate::validation::error::GuardError;
use crate::validation::limits::IntBound;

fn expect_sequence<'a>(param: &str, value: &'a ArgValue) -> Result<&'a [ArgValue], GuardError> {
    match value {
        ArgValue::Sequence(items) => Ok(items),
        other => Err(GuardError::invalid_type(param, other, KindSet(vec![ArgKind::Sequence]))),
    }
}

/// A 1-D list of dimensions. `Absent` entries are wildcards; every other entry
/// must be an integer in the positive bounded range.
pub(crate) fn check_shape(
    param: &str,
    value: &ArgValue,
    bound: IntBound,
    cfg: &GuardConfig,
) -> Result<(), GuardError> {
    for (i, dim) in expect_sequence(param, value)?.iter().enumerate() {
        if dim.is_absent() {
            continue;
        }
        let path = format!("{}[{}]", param, i);
        if as_integer(dim, cfg).is_none() {
            return Err(GuardError::invalid_type(
                &path,
                dim,
                KindSet(vec![ArgKind::Integer, ArgKind::Absent]),
            ));
        }
        check_positive_bounded(&path, dim, bound, cfg)?;
    }
    Ok(())
}

/// An array-like value of rank one.
pub(crate) fn check_one_dimensional(param: &str, value: &ArgValue) -> Result<(), GuardError> {
    match value {
        ArgValue::Array(info) if info.rank() == 1 => Ok(()),
        ArgValue::Array(info) => Err(GuardError::invalid_value(
            param,
            value,
            format!("must be a 1-D array, got {}-D", info.rank()),
        )),
        other => Err(GuardError::invalid_type(param, other, KindSet(vec![ArgKind::Array]))),
    }
}

/// A sequence with at least one element.
pub(crate) fn check_non_empty(param: &str, value: &ArgValue) -> Result<(), GuardError> {
    if expect_sequence(param, value)?.is_empty() {
        Err(GuardError::invalid_value(param, value, "must not be empty"))
    } else {
        Ok(())
    }
}
