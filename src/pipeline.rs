//! A composed pipeline of transform operations.
use crate::args::{ArgKind, ArgValue, CallArgs, KindSet, TransformOp};
use crate::validation::{check_compose_call, registry, GuardError, OpKind, Validated};
use std::sync::Arc;

/// Runs its transforms in order over one data value.
#[derive(Debug, Clone)]
pub struct Compose {
    transforms: Vec<Arc<dyn TransformOp>>,
}

impl Validated for Compose {
    const OP: OpKind = OpKind::Compose;
}

impl Compose {
    /// Builds a pipeline from a `transforms` list, positional or by keyword.
    pub fn new(args: CallArgs) -> Result<Self, GuardError> {
        registry().wrap(Self::OP, Self::from_args).call(args)?
    }

    // Validation has already run, so the error arms only fire if the
    // Compose table entry and this constructor disagree.
    fn from_args(args: CallArgs) -> Result<Self, GuardError> {
        let list = args
            .positional
            .into_iter()
            .next()
            .or_else(|| args.named.into_iter().find(|(k, _)| k == "transforms").map(|(_, v)| v))
            .unwrap_or(ArgValue::Absent);
        let items = match list {
            ArgValue::Sequence(items) => items,
            other => return Err(GuardError::invalid_type("transforms", &other, KindSet(vec![ArgKind::Sequence]))),
        };
        let transforms = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                ArgValue::Operation(op) => Ok(op),
                other => Err(GuardError::invalid_type(
                    &format!("transforms[{}]", i),
                    &other,
                    KindSet(vec![ArgKind::Operation]),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { transforms })
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Invokes the pipeline. The data argument is required.
    pub fn call(&self, args: CallArgs) -> Result<ArgValue, GuardError> {
        let data = check_compose_call(&args)?;
        self.transforms.iter().try_fold(data, |acc, op| op.apply(acc))
    }
}

impl TransformOp for Compose {
    fn name(&self) -> &str {
        "Compose"
    }

    fn apply(&self, data: ArgValue) -> Result<ArgValue, GuardError> {
        self.call(CallArgs::new().arg(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::FnTransform;
    use crate::validation::ErrorKind;

    fn add(n: i128) -> ArgValue {
        ArgValue::operation(FnTransform::new(format!("add{}", n), move |d| match d {
            ArgValue::Integer(i) => ArgValue::Integer(i + n),
            other => other,
        }))
    }

    fn double() -> ArgValue {
        ArgValue::operation(FnTransform::new("double", |d| match d {
            ArgValue::Integer(i) => ArgValue::Integer(i * 2),
            other => other,
        }))
    }

    #[test]
    fn test_runs_transforms_in_order() {
        let pipeline = Compose::new(CallArgs::new().arg(ArgValue::list([add(1), double()]))).unwrap();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.call(CallArgs::new().arg(3)).unwrap(), ArgValue::Integer(8));
        assert_eq!(pipeline.call(CallArgs::new().kwarg("data", 3)).unwrap(), ArgValue::Integer(8));
    }

    #[test]
    fn test_keyword_construction() {
        let pipeline = Compose::new(CallArgs::new().kwarg("transforms", ArgValue::list([double()]))).unwrap();
        assert_eq!(pipeline.call(CallArgs::new().arg(5)).unwrap(), ArgValue::Integer(10));
    }

    #[test]
    fn test_invoked_without_data() {
        let pipeline = Compose::new(CallArgs::new().arg(ArgValue::list([double()]))).unwrap();
        let err = pipeline.call(CallArgs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInvocation);
        assert!(err.to_string().contains("Fix invocation"));
    }

    #[test]
    fn test_construction_is_validated() {
        let err = Compose::new(CallArgs::new().arg(ArgValue::Sequence(vec![]))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        let err = Compose::new(CallArgs::new().arg(ArgValue::list([double(), ArgValue::Integer(1)]))).unwrap_err();
        assert_eq!(err.param(), Some("transforms[1]"));
    }

    #[test]
    fn test_unvalidated_input_is_not_an_empty_pipeline() {
        let err = Compose::from_args(CallArgs::new()).unwrap_err();
        assert_eq!(err.param(), Some("transforms"));
        let err = Compose::from_args(CallArgs::new().arg(ArgValue::list([double(), ArgValue::Integer(7)]))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert_eq!(err.param(), Some("transforms[1]"));
    }

    #[test]
    fn test_pipelines_nest() {
        let inner = Compose::new(CallArgs::new().arg(ArgValue::list([add(1)]))).unwrap();
        let outer = Compose::new(CallArgs::new().arg(ArgValue::list([ArgValue::operation(inner), double()]))).unwrap();
        assert_eq!(outer.call(CallArgs::new().arg(1)).unwrap(), ArgValue::Integer(4));
    }
}
