//! The closed set of argument values a constructor can receive.
use super::dtype::{DataType, Relational};
use crate::validation::GuardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A transform operation that can appear in a pipeline's step list.
///
/// Anything implementing this trait is a "known" operation; there is no
/// other way for a value to pass the known-operation check.
pub trait TransformOp: Send + Sync + fmt::Debug {
    /// Short name used in error messages.
    fn name(&self) -> &str;

    /// Runs the operation on one data value.
    fn apply(&self, data: ArgValue) -> Result<ArgValue, GuardError>;
}

/// Adapts a plain closure into a `TransformOp`.
pub struct FnTransform<F> {
    name: String,
    func: F,
}

impl<F> FnTransform<F>
where
    F: Fn(ArgValue) -> ArgValue + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self { name: name.into(), func }
    }
}

impl<F> fmt::Debug for FnTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform").field("name", &self.name).finish()
    }
}

impl<F> TransformOp for FnTransform<F>
where
    F: Fn(ArgValue) -> ArgValue + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, data: ArgValue) -> Result<ArgValue, GuardError> {
        Ok((self.func)(data))
    }
}

/// Bounds of a slice object; every component is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

/// Shape and element type of an array-like argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayInfo {
    pub shape: Vec<usize>,
    pub dtype: DataType,
}

impl ArrayInfo {
    pub fn new(shape: Vec<usize>, dtype: DataType) -> Self {
        Self { shape, dtype }
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}

/// One argument as seen by the validation layer.
#[derive(Debug, Clone)]
pub enum ArgValue {
    Absent,
    Bool(bool),
    Integer(i128),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<ArgValue>),
    Array(ArrayInfo),
    Slice(SliceSpec),
    Ellipsis,
    DType(DataType),
    Relational(Relational),
    Operation(Arc<dyn TransformOp>),
    /// A value of some foreign type, identified only by its type name.
    Other(String),
}

/// The payload-free discriminant of an `ArgValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    Absent,
    Bool,
    Integer,
    Float,
    Text,
    Bytes,
    Sequence,
    Array,
    Slice,
    Ellipsis,
    DType,
    Relational,
    Operation,
    Other,
}

impl ArgKind {
    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Absent => "None",
            ArgKind::Bool => "bool",
            ArgKind::Integer => "int",
            ArgKind::Float => "float",
            ArgKind::Text => "str",
            ArgKind::Bytes => "bytes",
            ArgKind::Sequence => "list",
            ArgKind::Array => "array",
            ArgKind::Slice => "slice",
            ArgKind::Ellipsis => "ellipsis",
            ArgKind::DType => "dtype",
            ArgKind::Relational => "Relational",
            ArgKind::Operation => "transform",
            ArgKind::Other => "object",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An allowed-type set, as shown in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSet(pub Vec<ArgKind>);

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|k| k.name()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl ArgValue {
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Absent => ArgKind::Absent,
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::Integer(_) => ArgKind::Integer,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Text(_) => ArgKind::Text,
            ArgValue::Bytes(_) => ArgKind::Bytes,
            ArgValue::Sequence(_) => ArgKind::Sequence,
            ArgValue::Array(_) => ArgKind::Array,
            ArgValue::Slice(_) => ArgKind::Slice,
            ArgValue::Ellipsis => ArgKind::Ellipsis,
            ArgValue::DType(_) => ArgKind::DType,
            ArgValue::Relational(_) => ArgKind::Relational,
            ArgValue::Operation(_) => ArgKind::Operation,
            ArgValue::Other(_) => ArgKind::Other,
        }
    }

    /// The type name reported to the caller. Foreign values keep their own name.
    pub fn type_name(&self) -> &str {
        match self {
            ArgValue::Other(name) => name,
            other => other.kind().name(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ArgValue::Absent)
    }

    pub fn operation(op: impl TransformOp + 'static) -> Self {
        ArgValue::Operation(Arc::new(op))
    }

    pub fn list(items: impl IntoIterator<Item = ArgValue>) -> Self {
        ArgValue::Sequence(items.into_iter().collect())
    }
}

impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArgValue::Absent, ArgValue::Absent) => true,
            (ArgValue::Ellipsis, ArgValue::Ellipsis) => true,
            (ArgValue::Bool(a), ArgValue::Bool(b)) => a == b,
            (ArgValue::Integer(a), ArgValue::Integer(b)) => a == b,
            (ArgValue::Float(a), ArgValue::Float(b)) => a == b,
            (ArgValue::Text(a), ArgValue::Text(b)) => a == b,
            (ArgValue::Bytes(a), ArgValue::Bytes(b)) => a == b,
            (ArgValue::Sequence(a), ArgValue::Sequence(b)) => a == b,
            (ArgValue::Array(a), ArgValue::Array(b)) => a == b,
            (ArgValue::Slice(a), ArgValue::Slice(b)) => a == b,
            (ArgValue::DType(a), ArgValue::DType(b)) => a == b,
            (ArgValue::Relational(a), ArgValue::Relational(b)) => a == b,
            // Operations are handles; two handles are equal only if they share the op.
            (ArgValue::Operation(a), ArgValue::Operation(b)) => Arc::ptr_eq(a, b),
            (ArgValue::Other(a), ArgValue::Other(b)) => a == b,
            _ => false,
        }
    }
}

fn fmt_bound(f: &mut fmt::Formatter<'_>, part: Option<i64>) -> fmt::Result {
    match part {
        Some(v) => write!(f, "{}", v),
        None => f.write_str("None"),
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Absent => f.write_str("None"),
            ArgValue::Bool(b) => f.write_str(if *b { "True" } else { "False" }),
            ArgValue::Integer(i) => write!(f, "{}", i),
            ArgValue::Float(x) => write!(f, "{:?}", x),
            ArgValue::Text(s) => write!(f, "'{}'", s),
            ArgValue::Bytes(b) => write!(f, "b<{} bytes>", b.len()),
            ArgValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ArgValue::Array(info) => write!(f, "array(shape={:?}, dtype={})", info.shape, info.dtype),
            ArgValue::Slice(s) => {
                f.write_str("slice(")?;
                fmt_bound(f, s.start)?;
                f.write_str(", ")?;
                fmt_bound(f, s.stop)?;
                f.write_str(", ")?;
                fmt_bound(f, s.step)?;
                f.write_str(")")
            }
            ArgValue::Ellipsis => f.write_str("Ellipsis"),
            ArgValue::DType(t) => write!(f, "{}", t),
            ArgValue::Relational(r) => write!(f, "Relational({})", r),
            ArgValue::Operation(op) => write!(f, "<transform {}>", op.name()),
            ArgValue::Other(name) => write!(f, "<{} object>", name),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Integer(v as i128)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Integer(v as i128)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Text(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Text(v)
    }
}

impl From<DataType> for ArgValue {
    fn from(v: DataType) -> Self {
        ArgValue::DType(v)
    }
}

impl From<Relational> for ArgValue {
    fn from(v: Relational) -> Self {
        ArgValue::Relational(v)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ArgValue::Absent, Into::into)
    }
}

/// The positional and keyword arguments of one constructor call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<ArgValue>,
    pub named: Vec<(String, ArgValue)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_values_keep_their_type_name() {
        let v = ArgValue::Other("Foo".into());
        assert_eq!(v.kind(), ArgKind::Other);
        assert_eq!(v.type_name(), "Foo");
        assert_eq!(ArgValue::Integer(3).type_name(), "int");
    }

    #[test]
    fn test_display_nested_sequence() {
        let v = ArgValue::list([ArgValue::Integer(2), ArgValue::Absent, ArgValue::Float(0.5)]);
        assert_eq!(v.to_string(), "[2, None, 0.5]");
        let s = ArgValue::Slice(SliceSpec { start: Some(1), stop: None, step: Some(2) });
        assert_eq!(s.to_string(), "slice(1, None, 2)");
    }

    #[test]
    fn test_operation_handles_compare_by_identity() {
        let op = ArgValue::operation(FnTransform::new("id", |d| d));
        let same = op.clone();
        let other = ArgValue::operation(FnTransform::new("id", |d| d));
        assert_eq!(op, same);
        assert_ne!(op, other);
    }

    #[test]
    fn test_kind_set_display() {
        let set = KindSet(vec![ArgKind::Integer, ArgKind::Float]);
        assert_eq!(set.to_string(), "[int, float]");
    }
}
