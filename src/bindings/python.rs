use crate::args::{ArgValue, ArrayInfo, CallArgs, DataType, Relational, SliceSpec, TransformOp};
use crate::pipeline::Compose;
use crate::validation::{self, registry, ErrorKind, GuardError, OpKind};
use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyDict, PyFloat, PyInt, PyList, PySlice, PyString, PyTuple};
use std::sync::Arc;

fn to_py_err(e: GuardError) -> PyErr {
    match e.kind() {
        ErrorKind::InvalidValue => PyValueError::new_err(e.to_string()),
        ErrorKind::TransformFailed => PyRuntimeError::new_err(e.to_string()),
        ErrorKind::InvalidType | ErrorKind::InvalidInvocation | ErrorKind::Signature => {
            PyTypeError::new_err(e.to_string())
        }
    }
}

#[pyclass(name = "DataType", eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyDataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    String,
}

impl From<PyDataType> for DataType {
    fn from(t: PyDataType) -> Self {
        match t {
            PyDataType::Bool => DataType::Bool,
            PyDataType::Int8 => DataType::Int8,
            PyDataType::Int16 => DataType::Int16,
            PyDataType::Int32 => DataType::Int32,
            PyDataType::Int64 => DataType::Int64,
            PyDataType::UInt8 => DataType::UInt8,
            PyDataType::UInt16 => DataType::UInt16,
            PyDataType::UInt32 => DataType::UInt32,
            PyDataType::UInt64 => DataType::UInt64,
            PyDataType::Float16 => DataType::Float16,
            PyDataType::Float32 => DataType::Float32,
            PyDataType::Float64 => DataType::Float64,
            PyDataType::String => DataType::String,
        }
    }
}

impl From<DataType> for PyDataType {
    fn from(t: DataType) -> Self {
        match t {
            DataType::Bool => PyDataType::Bool,
            DataType::Int8 => PyDataType::Int8,
            DataType::Int16 => PyDataType::Int16,
            DataType::Int32 => PyDataType::Int32,
            DataType::Int64 => PyDataType::Int64,
            DataType::UInt8 => PyDataType::UInt8,
            DataType::UInt16 => PyDataType::UInt16,
            DataType::UInt32 => PyDataType::UInt32,
            DataType::UInt64 => PyDataType::UInt64,
            DataType::Float16 => PyDataType::Float16,
            DataType::Float32 => PyDataType::Float32,
            DataType::Float64 => PyDataType::Float64,
            DataType::String => PyDataType::String,
        }
    }
}

#[pyclass(name = "Relational", eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyRelational {
    EQ,
    NE,
    GT,
    GE,
    LT,
    LE,
}

impl From<PyRelational> for Relational {
    fn from(r: PyRelational) -> Self {
        match r {
            PyRelational::EQ => Relational::EQ,
            PyRelational::NE => Relational::NE,
            PyRelational::GT => Relational::GT,
            PyRelational::GE => Relational::GE,
            PyRelational::LT => Relational::LT,
            PyRelational::LE => Relational::LE,
        }
    }
}

impl From<Relational> for PyRelational {
    fn from(r: Relational) -> Self {
        match r {
            Relational::EQ => PyRelational::EQ,
            Relational::NE => PyRelational::NE,
            Relational::GT => PyRelational::GT,
            Relational::GE => PyRelational::GE,
            Relational::LT => PyRelational::LT,
            Relational::LE => PyRelational::LE,
        }
    }
}

/// A Python callable used as a pipeline step.
#[derive(Debug)]
struct PyTransform {
    name: String,
    callable: Py<PyAny>,
}

impl TransformOp for PyTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, data: ArgValue) -> Result<ArgValue, GuardError> {
        Python::attach(|py| -> PyResult<ArgValue> {
            let input = to_py(py, &data)?;
            let output = self.callable.bind(py).call1((input,))?;
            from_py(&output)
        })
        .map_err(|e| GuardError::TransformFailed { op: self.name.clone(), reason: e.to_string() })
    }
}

fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "object".to_string())
}

/// Maps a numpy-style dtype name onto the declared type enumeration.
fn dtype_from_name(name: &str) -> Option<DataType> {
    let dt = match name {
        "bool" => DataType::Bool,
        "int8" => DataType::Int8,
        "int16" => DataType::Int16,
        "int32" => DataType::Int32,
        "int64" => DataType::Int64,
        "uint8" => DataType::UInt8,
        "uint16" => DataType::UInt16,
        "uint32" => DataType::UInt32,
        "uint64" => DataType::UInt64,
        "float16" => DataType::Float16,
        "float32" => DataType::Float32,
        "float64" => DataType::Float64,
        s if s.starts_with("<U") || s.starts_with("|S") || s == "str" => DataType::String,
        _ => return None,
    };
    Some(dt)
}

fn array_info(obj: &Bound<'_, PyAny>) -> PyResult<Option<ArrayInfo>> {
    if !(obj.hasattr("shape")? && obj.hasattr("dtype")?) {
        return Ok(None);
    }
    let shape = obj.getattr("shape")?.extract::<Vec<usize>>()?;
    let dtype_name = obj.getattr("dtype")?.str()?.to_string();
    Ok(dtype_from_name(&dtype_name).map(|dtype| ArrayInfo::new(shape, dtype)))
}

/// Converts a Python value into the closed argument variant.
fn from_py(obj: &Bound<'_, PyAny>) -> PyResult<ArgValue> {
    // `bool` is a subclass of `int`, so it must be tested first.
    if obj.is_none() {
        Ok(ArgValue::Absent)
    } else if obj.is_instance_of::<PyBool>() {
        Ok(ArgValue::Bool(obj.extract::<bool>()?))
    } else if obj.is_instance_of::<PyInt>() {
        Ok(ArgValue::Integer(obj.extract::<i128>()?))
    } else if obj.is_instance_of::<PyFloat>() {
        Ok(ArgValue::Float(obj.extract::<f64>()?))
    } else if obj.is_instance_of::<PyString>() {
        Ok(ArgValue::Text(obj.extract::<String>()?))
    } else if obj.is_instance_of::<PyBytes>() {
        Ok(ArgValue::Bytes(obj.extract::<Vec<u8>>()?))
    } else if obj.is_instance_of::<PyList>() {
        let mut items = Vec::new();
        for item in obj.try_iter()? {
            items.push(from_py(&item?)?);
        }
        Ok(ArgValue::Sequence(items))
    } else if obj.is_instance_of::<PySlice>() {
        Ok(ArgValue::Slice(SliceSpec {
            start: obj.getattr("start")?.extract::<Option<i64>>()?,
            stop: obj.getattr("stop")?.extract::<Option<i64>>()?,
            step: obj.getattr("step")?.extract::<Option<i64>>()?,
        }))
    } else if let Ok(dt) = obj.extract::<PyRef<'_, PyDataType>>() {
        Ok(ArgValue::DType((*dt).into()))
    } else if let Ok(rel) = obj.extract::<PyRef<'_, PyRelational>>() {
        Ok(ArgValue::Relational((*rel).into()))
    } else if type_name(obj) == "ellipsis" {
        Ok(ArgValue::Ellipsis)
    } else if let Some(info) = array_info(obj)? {
        Ok(ArgValue::Array(info))
    } else if obj.is_callable() {
        let name = obj
            .getattr("__name__")
            .and_then(|n| n.extract::<String>())
            .unwrap_or_else(|_| type_name(obj));
        Ok(ArgValue::Operation(Arc::new(PyTransform { name, callable: obj.clone().unbind() })))
    } else {
        Ok(ArgValue::Other(type_name(obj)))
    }
}

/// Converts a pipeline data value back into Python.
fn to_py<'py>(py: Python<'py>, value: &ArgValue) -> PyResult<Bound<'py, PyAny>> {
    Ok(match value {
        ArgValue::Absent => py.None().into_bound(py),
        ArgValue::Bool(b) => PyBool::new(py, *b).to_owned().into_any(),
        ArgValue::Integer(i) => i.into_pyobject(py)?.into_any(),
        ArgValue::Float(x) => PyFloat::new(py, *x).into_any(),
        ArgValue::Text(s) => PyString::new(py, s).into_any(),
        ArgValue::Bytes(b) => PyBytes::new(py, b).into_any(),
        ArgValue::Sequence(items) => {
            let converted = items.iter().map(|i| to_py(py, i)).collect::<PyResult<Vec<_>>>()?;
            PyList::new(py, converted)?.into_any()
        }
        ArgValue::DType(t) => Bound::new(py, PyDataType::from(*t))?.into_any(),
        ArgValue::Relational(r) => Bound::new(py, PyRelational::from(*r))?.into_any(),
        other => {
            return Err(PyTypeError::new_err(format!(
                "cannot pass a {} value to a Python transform",
                other.type_name()
            )))
        }
    })
}

fn call_args(args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<CallArgs> {
    let mut call = CallArgs::new();
    for item in args.iter() {
        call = call.arg(from_py(&item)?);
    }
    if let Some(kwargs) = kwargs {
        for (key, value) in kwargs.iter() {
            call = call.kwarg(key.extract::<String>()?, from_py(&value)?);
        }
    }
    Ok(call)
}

/// A validated pipeline of Python callables.
#[pyclass(name = "Compose", frozen)]
pub struct PyCompose {
    inner: Compose,
}

#[pymethods]
impl PyCompose {
    #[new]
    #[pyo3(signature = (*args, **kwargs))]
    fn new(args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let call = call_args(args, kwargs)?;
        let inner = Compose::new(call).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[pyo3(signature = (*args, **kwargs))]
    fn __call__<'py>(
        &self,
        args: &Bound<'py, PyTuple>,
        kwargs: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let call = call_args(args, kwargs)?;
        let out = self.inner.call(call).map_err(to_py_err)?;
        to_py(args.py(), &out)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Validates constructor arguments for the named op. Raises on the first failure.
#[pyfunction]
#[pyo3(signature = (op, *args, **kwargs))]
fn validate(op: &str, args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
    let op: OpKind = op.parse().map_err(|e: validation::UnknownOp| PyValueError::new_err(e.to_string()))?;
    let call = call_args(args, kwargs)?;
    registry().validate(op, &call).map(|_| ()).map_err(to_py_err)
}

/// Checks that a composed pipeline was invoked with a data argument.
#[pyfunction]
#[pyo3(name = "check_compose_call", signature = (*args, **kwargs))]
fn py_check_compose_call(args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
    let call = call_args(args, kwargs)?;
    validation::check_compose_call(&call).map(|_| ()).map_err(to_py_err)
}

#[pyfunction]
fn describe_ops() -> PyResult<String> {
    registry().describe().map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_compose_call, m)?)?;
    m.add_function(wrap_pyfunction!(describe_ops, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_class::<PyDataType>()?;
    m.add_class::<PyRelational>()?;
    m.add_class::<PyCompose>()?;
    Ok(())
}
