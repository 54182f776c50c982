//! The process-wide table of validator specifications.
use super::error::GuardError;
use super::spec::{Check, ValidatorSpec};
use super::specs::{spec_for, OpKind};
use super::validator::Guarded;
use crate::args::{CallArgs, ResolvedArgs};
use crate::config::GuardConfig;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Immutable after construction; safe to share between threads without locking.
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<ValidatorSpec>,
    config: GuardConfig,
}

#[derive(Serialize)]
struct ParamSummary {
    name: &'static str,
    required: bool,
    variadic: bool,
    default: Option<String>,
}

#[derive(Serialize)]
struct OpSummary<'a> {
    op: OpKind,
    params: Vec<ParamSummary>,
    checks: &'a [Check],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(GuardConfig::default())
    }

    pub fn with_config(config: GuardConfig) -> Self {
        Self {
            specs: OpKind::ALL.iter().map(|&op| spec_for(op)).collect(),
            config,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn spec(&self, op: OpKind) -> &ValidatorSpec {
        // `specs` is built from `OpKind::ALL` in declaration order.
        &self.specs[op as usize]
    }

    /// Runs the validator for `op` against one call.
    pub fn validate(&self, op: OpKind, args: &CallArgs) -> Result<ResolvedArgs, GuardError> {
        match self.spec(op).validate(args, &self.config) {
            Ok(resolved) => {
                trace!(op = %op, "constructor arguments accepted");
                Ok(resolved)
            }
            Err(e) => {
                debug!(op = %op, param = e.param().unwrap_or("-"), error = %e, "constructor arguments rejected");
                Err(e)
            }
        }
    }

    /// Validates independent calls in parallel. Results keep the input order.
    pub fn validate_batch(&self, calls: &[(OpKind, CallArgs)]) -> Vec<Result<(), GuardError>> {
        calls
            .par_iter()
            .map(|(op, args)| self.validate(*op, args).map(|_| ()))
            .collect()
    }

    /// Wraps `constructor` so every call goes through the validator for `op` first.
    pub fn wrap<F>(&self, op: OpKind, constructor: F) -> Guarded<'_, F> {
        Guarded::new(constructor, self.spec(op)).with_config(self.config)
    }

    /// Renders the whole table as pretty JSON.
    pub fn describe(&self) -> Result<String, serde_json::Error> {
        let summaries: Vec<OpSummary> = self
            .specs
            .iter()
            .map(|spec| OpSummary {
                op: spec.op,
                params: spec
                    .signature
                    .params
                    .iter()
                    .map(|p| ParamSummary {
                        name: p.name,
                        required: p.is_required(),
                        variadic: p.variadic,
                        default: p.default.as_ref().map(|d| d.to_string()),
                    })
                    .collect(),
                checks: &spec.checks,
            })
            .collect();
        serde_json::to_string_pretty(&summaries)
    }
}

/// The shared registry, built on first use with the default config.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}
