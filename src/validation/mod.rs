//! The pre-construction validation layer.
//!
//! A `ValidatorSpec` binds a call's arguments to an op's signature and runs
//! its declared checks in order. The first failure is returned to the caller
//! and the op's constructor never runs.

// Publicly export the primary components for use by other modules.
pub use self::error::{ErrorKind, GuardError};
pub use self::limits::IntBound;
pub use self::registry::{registry, Registry};
pub use self::spec::{Check, Rule, ValidatorSpec, When};
pub use self::specs::{OpKind, UnknownOp};
pub use self::validator::{check_compose_call, wrap, Guarded, Validated};

// --- MODULE DECLARATIONS ---
mod error;
pub mod limits;
pub mod registry;
mod spec;
mod specs;
mod validator;
mod rules {
    pub mod numeric;
    pub mod ops;
    pub mod shape;
    pub mod types;
}
