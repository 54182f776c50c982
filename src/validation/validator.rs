//! Gates constructor calls behind their validator specification.
use super::error::GuardError;
use super::registry::registry;
use super::spec::ValidatorSpec;
use super::specs::OpKind;
use crate::args::{bind, ArgValue, CallArgs, Param, Signature};
use crate::config::GuardConfig;

/// A constructor that only runs once its arguments pass validation.
///
/// The constructor receives the caller's original arguments, not the
/// default-filled view used for checking, so its own default handling is
/// unchanged.
pub struct Guarded<'a, F> {
    constructor: F,
    spec: &'a ValidatorSpec,
    config: GuardConfig,
}

impl<'a, F> Guarded<'a, F> {
    pub fn new(constructor: F, spec: &'a ValidatorSpec) -> Self {
        Self { constructor, spec, config: GuardConfig::default() }
    }

    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spec(&self) -> &ValidatorSpec {
        self.spec
    }

    /// Validates `args`, then forwards them unchanged to the constructor.
    pub fn call<T>(&self, args: CallArgs) -> Result<T, GuardError>
    where
        F: Fn(CallArgs) -> T,
    {
        self.spec.validate(&args, &self.config)?;
        Ok((self.constructor)(args))
    }
}

/// Wraps `constructor` with `spec`, using the default config.
pub fn wrap<F>(constructor: F, spec: &ValidatorSpec) -> Guarded<'_, F> {
    Guarded::new(constructor, spec)
}

/// Implemented by op types whose factories must validate before building.
pub trait Validated {
    const OP: OpKind;

    fn validate(args: &CallArgs) -> Result<(), GuardError> {
        registry().validate(Self::OP, args).map(|_| ())
    }
}

const COMPOSE_CALL_HINT: &str =
    "Compose was called without a data argument. Fix invocation (avoid it being invoked as Compose([...])()).";

/// Call-time check for a composed pipeline: a data argument must be supplied.
///
/// Returns the data argument on success.
pub fn check_compose_call(args: &CallArgs) -> Result<ArgValue, GuardError> {
    let sig = Signature::new("Compose.__call__", vec![Param::optional("data", ArgValue::Absent)]);
    let resolved = bind(&sig, args)?;
    match resolved.get("data") {
        Some(data) if !data.is_absent() => Ok(data.clone()),
        _ => Err(GuardError::InvalidInvocation {
            target: "Compose".to_string(),
            hint: COMPOSE_CALL_HINT.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{ArrayInfo, DataType, Relational};
    use crate::validation::ErrorKind;
    use rstest::rstest;
    use std::cell::Cell;

    #[test]
    fn test_guarded_forwards_original_args() {
        let spec = registry().spec(OpKind::OneHot);
        let guarded = wrap(|args: CallArgs| args, spec);
        let args = CallArgs::new().arg(10);
        // The default smoothing_rate is not injected into the forwarded call.
        assert_eq!(guarded.call(args.clone()).unwrap(), args);
    }

    #[rstest]
    #[case(OpKind::Mask, CallArgs::new().arg(Relational::GE).kwarg("constant", 3))]
    #[case(OpKind::PadEnd, CallArgs::new().kwarg("pad_shape", ArgValue::list([ArgValue::Integer(4)])))]
    #[case(OpKind::Concatenate, CallArgs::new().kwarg("append", ArgValue::Array(ArrayInfo::new(vec![2], DataType::Int64))))]
    #[case(OpKind::RandomApply, CallArgs::new().arg(ArgValue::list([ArgValue::operation(crate::args::FnTransform::new("id", |d| d))])))]
    #[case(OpKind::Slice, CallArgs::new())]
    fn test_guarded_forwards_args_untouched(#[case] op: OpKind, #[case] args: CallArgs) {
        let guarded = wrap(|forwarded: CallArgs| forwarded, registry().spec(op));
        assert_eq!(guarded.call(args.clone()).unwrap(), args);
    }

    #[test]
    fn test_guarded_skips_constructor_on_failure() {
        let calls = Cell::new(0);
        let spec = registry().spec(OpKind::OneHot);
        let guarded = wrap(|_: CallArgs| calls.set(calls.get() + 1), spec);

        assert!(guarded.call(CallArgs::new().arg(-3)).is_err());
        assert!(guarded.call(CallArgs::new().arg(10).arg(1.5)).is_err());
        assert_eq!(calls.get(), 0);

        guarded.call(CallArgs::new().arg(10).arg(0.1)).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_validated_trait_uses_registry() {
        struct PadEnd;
        impl Validated for PadEnd {
            const OP: OpKind = OpKind::PadEnd;
        }
        let ok = CallArgs::new().arg(ArgValue::list([ArgValue::Integer(2), ArgValue::Absent]));
        assert!(PadEnd::validate(&ok).is_ok());
        let bad = CallArgs::new().arg(ArgValue::list([ArgValue::Integer(0)]));
        assert_eq!(PadEnd::validate(&bad).unwrap_err().param(), Some("pad_shape[0]"));
    }

    #[test]
    fn test_compose_call_requires_data() {
        let err = check_compose_call(&CallArgs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInvocation);
        assert!(err.to_string().contains("avoid it being invoked as Compose([...])()"));

        let err = check_compose_call(&CallArgs::new().arg(ArgValue::Absent)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInvocation);

        assert_eq!(check_compose_call(&CallArgs::new().arg(3)).unwrap(), ArgValue::Integer(3));
        assert_eq!(check_compose_call(&CallArgs::new().kwarg("data", 3)).unwrap(), ArgValue::Integer(3));
    }

    #[test]
    fn test_compose_call_rejects_extra_arguments() {
        let err = check_compose_call(&CallArgs::new().arg(1).arg(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signature);
    }
}
