//! Rule for transform step lists.
use crate::args::{ArgKind, ArgValue, KindSet};
use crate::validation::error::GuardError;

/// Every element must be a transform operation; the first stranger is reported by index.
pub(crate) fn check_known_ops(param: &str, value: &ArgValue) -> Result<(), GuardError> {
    let ArgValue::Sequence(items) = value else {
        return Err(GuardError::invalid_type(param, value, KindSet(vec![ArgKind::Sequence])));
    };
    match items.iter().position(|op| !matches!(op, ArgValue::Operation(_))) {
        Some(i) => Err(GuardError::invalid_type(
            &format!("{}[{}]", param, i),
            &items[i],
            KindSet(vec![ArgKind::Operation]),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::FnTransform;
    use crate::validation::ErrorKind;

    #[test]
    fn test_known_ops() {
        let op = ArgValue::operation(FnTransform::new("identity", |d| d));
        assert!(check_known_ops("transforms", &ArgValue::list([op.clone(), op.clone()])).is_ok());

        let err = check_known_ops("transforms", &ArgValue::list([op, ArgValue::Integer(3)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert_eq!(err.param(), Some("transforms[1]"));
    }
}
