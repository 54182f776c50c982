//! Declarative rule sets and their evaluation.
use super::error::GuardError;
use super::limits::IntBound;
use super::rules::{numeric, ops, shape, types};
use super::specs::OpKind;
use crate::args::{bind, ArgKind, ArgValue, CallArgs, Param, ResolvedArgs, Signature};
use crate::config::GuardConfig;
use serde::Serialize;

/// One constraint, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    OneOf { kinds: Vec<ArgKind> },
    Positive,
    PositiveBounded { bound: IntBound },
    InRange { low: f64, high: f64 },
    Enumerated { values: Vec<i64> },
    Shape { bound: IntBound },
    OneDimensional,
    NonEmpty,
    KnownOps,
    /// Applies the nested rules to every element of a sequence. Non-sequences pass.
    Each { rules: Vec<Rule> },
}

impl Rule {
    pub fn one_of(kinds: &[ArgKind]) -> Self {
        Rule::OneOf { kinds: kinds.to_vec() }
    }

    pub fn in_range(low: f64, high: f64) -> Self {
        Rule::InRange { low, high }
    }

    pub fn each(rules: Vec<Rule>) -> Self {
        Rule::Each { rules }
    }

    fn apply(&self, param: &str, value: &ArgValue, cfg: &GuardConfig) -> Result<(), GuardError> {
        match self {
            Rule::OneOf { kinds } => types::check_type(param, value, kinds, cfg),
            Rule::Positive => numeric::check_positive(param, value, cfg),
            Rule::PositiveBounded { bound } => numeric::check_positive_bounded(param, value, *bound, cfg),
            Rule::InRange { low, high } => numeric::check_range(param, value, *low, *high, cfg),
            Rule::Enumerated { values } => numeric::check_enumerated(param, value, values, cfg),
            Rule::Shape { bound } => shape::check_shape(param, value, *bound, cfg),
            Rule::OneDimensional => shape::check_one_dimensional(param, value),
            Rule::NonEmpty => shape::check_non_empty(param, value),
            Rule::KnownOps => ops::check_known_ops(param, value),
            Rule::Each { rules } => {
                let ArgValue::Sequence(items) = value else {
                    return Ok(());
                };
                for (i, item) in items.iter().enumerate() {
                    let path = format!("{}[{}]", param, i);
                    for rule in rules {
                        rule.apply(&path, item, cfg)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// When a check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum When {
    Always,
    /// Skipped when the resolved value is `Absent`.
    WhenPresent,
}

/// The rules attached to one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    pub param: &'static str,
    pub when: When,
    pub rules: Vec<Rule>,
}

/// The full rule set of one constructible op.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorSpec {
    pub op: OpKind,
    pub signature: Signature,
    pub checks: Vec<Check>,
}

impl ValidatorSpec {
    pub fn new(op: OpKind, params: Vec<Param>) -> Self {
        Self {
            op,
            signature: Signature::new(op.name(), params),
            checks: Vec::new(),
        }
    }

    /// Adds rules that always run for `param`.
    pub fn check(self, param: &'static str, rules: Vec<Rule>) -> Self {
        self.push(param, When::Always, rules)
    }

    /// Adds rules that run only when `param` resolved to a non-absent value.
    pub fn check_present(self, param: &'static str, rules: Vec<Rule>) -> Self {
        self.push(param, When::WhenPresent, rules)
    }

    fn push(mut self, param: &'static str, when: When, rules: Vec<Rule>) -> Self {
        assert!(
            self.signature.position(param).is_some(),
            "check on undeclared parameter '{}' of {}",
            param,
            self.op.name()
        );
        self.checks.push(Check { param, when, rules });
        self
    }

    /// Binds `args` and runs every check in declaration order.
    ///
    /// The first failing rule stops evaluation. `args` is never modified.
    pub fn validate(&self, args: &CallArgs, cfg: &GuardConfig) -> Result<ResolvedArgs, GuardError> {
        let resolved = bind(&self.signature, args)?;
        for check in &self.checks {
            let value = resolved.get(check.param).unwrap_or(&ArgValue::Absent);
            if check.when == When::WhenPresent && value.is_absent() {
                continue;
            }
            for rule in &check.rules {
                rule.apply(check.param, value, cfg)?;
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn sample_spec() -> ValidatorSpec {
        ValidatorSpec::new(OpKind::RandomApply, vec![Param::required("transforms"), Param::optional("prob", 0.5)])
            .check("transforms", vec![Rule::one_of(&[ArgKind::Sequence]), Rule::NonEmpty])
            .check_present("prob", vec![Rule::one_of(&[ArgKind::Float]), Rule::in_range(0.0, 1.0)])
    }

    #[test]
    fn test_first_failure_short_circuits() {
        // Both parameters are wrong; only the first declared check reports.
        let args = CallArgs::new().arg(ArgValue::Sequence(vec![])).arg(7.0);
        let err = sample_spec().validate(&args, &GuardConfig::default()).unwrap_err();
        assert_eq!(err.param(), Some("transforms"));
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_present_condition_skips_absent() {
        let args = CallArgs::new().arg(ArgValue::list([ArgValue::Integer(1)])).kwarg("prob", ArgValue::Absent);
        assert!(sample_spec().validate(&args, &GuardConfig::default()).is_ok());
    }

    #[test]
    fn test_each_builds_nested_paths() {
        let rule = Rule::each(vec![Rule::each(vec![Rule::one_of(&[ArgKind::Integer])])]);
        let value = ArgValue::list([
            ArgValue::Integer(0),
            ArgValue::list([ArgValue::Integer(1), ArgValue::Text("x".into())]),
        ]);
        let err = rule.apply("slices", &value, &GuardConfig::default()).unwrap_err();
        assert_eq!(err.param(), Some("slices[1][1]"));
    }

    #[test]
    #[should_panic(expected = "undeclared parameter")]
    fn test_check_on_unknown_param_is_rejected() {
        ValidatorSpec::new(OpKind::Fill, vec![Param::required("fill_value")]).check("value", vec![]);
    }
}
