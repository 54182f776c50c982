//! Defines the error types for the validation module.
use crate::args::{ArgValue, BindingError, KindSet};
use thiserror::Error;

/// The specific category of a validation error.
///
// This enum allows for programmatic inspection of errors, which is more
// robust than string matching on the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The argument's type is outside the allowed set.
    InvalidType,
    /// The argument has an allowed type but violates a value constraint.
    InvalidValue,
    /// An object was called without its required data argument.
    InvalidInvocation,
    /// The call's arguments could not be bound to the signature.
    Signature,
    /// A transform in a composed pipeline failed while running.
    TransformFailed,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    #[error("Argument '{param}' with value {value} is not of type {allowed}, but got {actual}.")]
    InvalidType { param: String, value: String, actual: String, allowed: KindSet },
    #[error("Argument '{param}' with value {value} is invalid: {reason}.")]
    InvalidValue { param: String, value: String, reason: String },
    #[error("{target} was invoked incorrectly: {hint}")]
    InvalidInvocation { target: String, hint: String },
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("Transform '{op}' failed: {reason}")]
    TransformFailed { op: String, reason: String },
}

impl GuardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuardError::InvalidType { .. } => ErrorKind::InvalidType,
            GuardError::InvalidValue { .. } => ErrorKind::InvalidValue,
            GuardError::InvalidInvocation { .. } => ErrorKind::InvalidInvocation,
            GuardError::Binding(_) => ErrorKind::Signature,
            GuardError::TransformFailed { .. } => ErrorKind::TransformFailed,
        }
    }

    pub(crate) fn invalid_type(param: &str, value: &ArgValue, allowed: KindSet) -> Self {
        GuardError::InvalidType {
            param: param.to_string(),
            value: value.to_string(),
            actual: value.type_name().to_string(),
            allowed,
        }
    }

    pub(crate) fn invalid_value(param: &str, value: &ArgValue, reason: impl Into<String>) -> Self {
        GuardError::InvalidValue {
            param: param.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The parameter this error names, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            GuardError::InvalidType { param, .. } | GuardError::InvalidValue { param, .. } => Some(param.as_str()),
            GuardError::Binding(BindingError::MissingArgument { param, .. })
            | GuardError::Binding(BindingError::MultipleValues { param, .. }) => Some(param.as_str()),
            GuardError::Binding(BindingError::UnexpectedKeyword { keyword, .. }) => Some(keyword.as_str()),
            _ => None,
        }
    }
}
