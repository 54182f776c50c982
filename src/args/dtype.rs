use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type descriptor supplied by the tensor runtime.
///
/// Validators only compare these by identity; nothing here interprets the
/// width or layout of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
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

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Float16 => "float16",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::String => "string",
        };
        f.write_str(name)
    }
}

/// Relational operator accepted by the mask op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relational {
    EQ,
    NE,
    GT,
    GE,
    LT,
    LE,
}

impl fmt::Display for Relational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relational::EQ => "==",
            Relational::NE => "!=",
            Relational::GT => ">",
            Relational::GE => ">=",
            Relational::LT => "<",
            Relational::LE => "<=",
        };
        f.write_str(symbol)
    }
}
