//! Argument values, constructor signatures, and the binder that joins them.
pub mod binder;
pub mod dtype;
pub mod signature;
pub mod value;

// Re-export key types for convenient access
pub use binder::{bind, BindingError, ResolvedArgs};
pub use dtype::{DataType, Relational};
pub use signature::{Param, Signature};
pub use value::{ArgKind, ArgValue, ArrayInfo, CallArgs, FnTransform, KindSet, SliceSpec, TransformOp};
