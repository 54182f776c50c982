//! Pre-construction argument validation for transform ops.
//!
//! Every op constructor is described by a `ValidatorSpec`: its parameter list
//! and the checks to run on each parameter. A call is bound to the parameter
//! list, checked in declaration order, and only then handed to the real
//! constructor.
//!
//! With the `python` feature, the same layer is exposed as the `_core`
//! Python module.

pub mod args;
pub mod config;
pub mod pipeline;
pub mod validation;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use args::{ArgKind, ArgValue, CallArgs, DataType, Param, Relational, Signature, TransformOp};
pub use config::GuardConfig;
pub use pipeline::Compose;
pub use validation::{registry, wrap, ErrorKind, GuardError, OpKind, Registry, Validated, ValidatorSpec};

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// This function defines the `_core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    bindings::python::register(m)
}
