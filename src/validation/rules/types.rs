//! Rule for allowed-type membership.
use crate::args::{ArgKind, ArgValue, KindSet};
use crate::config::GuardConfig;
use crate::validation::error::GuardError;

/// Fails with `InvalidType` unless the value's kind is in `allowed`.
///
/// `Absent` only passes when listed. A boolean passes an integer slot only
/// under `GuardConfig::bool_as_integer`.
pub(crate) fn check_type(
    param: &str,
    value: &ArgValue,
    allowed: &[ArgKind],
    cfg: &GuardConfig,
) -> Result<(), GuardError> {
    let kind = value.kind();
    let coerced = kind == ArgKind::Bool && cfg.bool_as_integer && allowed.contains(&ArgKind::Integer);
    if allowed.contains(&kind) || coerced {
        Ok(())
    } else {
        Err(GuardError::invalid_type(param, value, KindSet(allowed.to_vec())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;
    use rstest::rstest;

    const SCALARS: &[ArgKind] = &[ArgKind::Text, ArgKind::Float, ArgKind::Bool, ArgKind::Integer, ArgKind::Bytes];

    #[rstest]
    #[case(ArgValue::Text("a".into()))]
    #[case(ArgValue::Float(1.5))]
    #[case(ArgValue::Bool(false))]
    #[case(ArgValue::Integer(-4))]
    #[case(ArgValue::Bytes(vec![1, 2]))]
    fn test_scalars_accepted(#[case] value: ArgValue) {
        assert!(check_type("fill_value", &value, SCALARS, &GuardConfig::default()).is_ok());
    }

    #[rstest]
    #[case(ArgValue::Absent)]
    #[case(ArgValue::Sequence(vec![]))]
    #[case(ArgValue::Other("dict".into()))]
    fn test_non_scalars_rejected(#[case] value: ArgValue) {
        let err = check_type("fill_value", &value, SCALARS, &GuardConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert!(err.to_string().contains("[str, float, bool, int, bytes]"));
    }

    #[test]
    fn test_absent_needs_explicit_listing() {
        let cfg = GuardConfig::default();
        assert!(check_type("x", &ArgValue::Absent, &[ArgKind::Integer], &cfg).is_err());
        assert!(check_type("x", &ArgValue::Absent, &[ArgKind::Integer, ArgKind::Absent], &cfg).is_ok());
    }

    #[test]
    fn test_bool_as_integer_is_opt_in() {
        let strict = GuardConfig::default();
        let legacy = GuardConfig { bool_as_integer: true };
        let err = check_type("num_classes", &ArgValue::Bool(true), &[ArgKind::Integer], &strict).unwrap_err();
        assert!(err.to_string().contains("but got bool"));
        assert!(check_type("num_classes", &ArgValue::Bool(true), &[ArgKind::Integer], &legacy).is_ok());
        assert!(check_type("x", &ArgValue::Bool(true), &[ArgKind::Float], &legacy).is_err());
    }
}
