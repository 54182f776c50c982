//! Rules for positivity, bounded integers, intervals and enumerations.
use crate::args::{ArgKind, ArgValue, KindSet};
use crate::config::GuardConfig;
use crate::validation::error::GuardError;
use crate::validation::limits::{IntBound, POS_INT_MIN};

/// Integer view of a value, honoring the boolean coercion switch.
pub(crate) fn as_integer(value: &ArgValue, cfg: &GuardConfig) -> Option<i128> {
    match value {
        ArgValue::Integer(i) => Some(*i),
        ArgValue::Bool(b) if cfg.bool_as_integer => Some(i128::from(*b)),
        _ => None,
    }
}

fn as_number(value: &ArgValue, cfg: &GuardConfig) -> Option<f64> {
    match value {
        ArgValue::Float(x) => Some(*x),
        other => as_integer(other, cfg).map(|i| i as f64),
    }
}

/// The value must be an integer greater than zero.
pub(crate) fn check_positive(param: &str, value: &ArgValue, cfg: &GuardConfig) -> Result<(), GuardError> {
    match as_integer(value, cfg) {
        Some(i) if i > 0 => Ok(()),
        _ => Err(GuardError::invalid_value(param, value, "must be an integer greater than 0")),
    }
}

/// The value must be an integer in `[POS_INT_MIN, bound.max()]`.
pub(crate) fn check_positive_bounded(
    param: &str,
    value: &ArgValue,
    bound: IntBound,
    cfg: &GuardConfig,
) -> Result<(), GuardError> {
    match as_integer(value, cfg) {
        Some(i) if (POS_INT_MIN..=bound.max()).contains(&i) => Ok(()),
        _ => Err(GuardError::invalid_value(
            param,
            value,
            format!(
                "must be an integer within [{}, {}={}]",
                POS_INT_MIN,
                bound.name(),
                bound.max()
            ),
        )),
    }
}

/// The value must be numeric and lie in the inclusive interval `[low, high]`.
pub(crate) fn check_range(
    param: &str,
    value: &ArgValue,
    low: f64,
    high: f64,
    cfg: &GuardConfig,
) -> Result<(), GuardError> {
    let Some(x) = as_number(value, cfg) else {
        return Err(GuardError::invalid_type(
            param,
            value,
            KindSet(vec![ArgKind::Integer, ArgKind::Float]),
        ));
    };
    // NaN fails both comparisons and is rejected here.
    if x >= low && x <= high {
        Ok(())
    } else {
        Err(GuardError::invalid_value(
            param,
            value,
            format!("must be within the required interval of [{:?}, {:?}]", low, high),
        ))
    }
}

/// The value must be an integer from an explicit set.
pub(crate) fn check_enumerated(
    param: &str,
    value: &ArgValue,
    allowed: &[i64],
    cfg: &GuardConfig,
) -> Result<(), GuardError> {
    match as_integer(value, cfg) {
        Some(i) if allowed.iter().any(|&a| i128::from(a) == i) => Ok(()),
        _ => Err(GuardError::invalid_value(
            param,
            value,
            format!("must be one of {:?}", allowed),
        )),
    }
}
