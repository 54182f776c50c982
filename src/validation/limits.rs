//! Named numeric bounds used by the bounded-integer checks.
use serde::{Deserialize, Serialize};

/// Lower limit of every "positive" integer argument.
pub const POS_INT_MIN: i128 = 1;

pub const UINT8_MAX: i128 = 255;
pub const UINT8_MIN: i128 = 0;
pub const UINT32_MAX: i128 = 4_294_967_295;
pub const UINT32_MIN: i128 = 0;
pub const UINT64_MAX: i128 = 18_446_744_073_709_551_615;
pub const UINT64_MIN: i128 = 0;
pub const INT32_MAX: i128 = 2_147_483_647;
pub const INT32_MIN: i128 = -2_147_483_648;
pub const INT64_MAX: i128 = 9_223_372_036_854_775_807;
pub const INT64_MIN: i128 = -9_223_372_036_854_775_808;
/// Largest integer a 32-bit float represents exactly.
pub const FLOAT_MAX_INTEGER: i128 = 16_777_216;
pub const FLOAT_MIN_INTEGER: i128 = -16_777_216;
/// Largest integer a 64-bit float represents exactly.
pub const DOUBLE_MAX_INTEGER: i128 = 9_007_199_254_740_992;
pub const DOUBLE_MIN_INTEGER: i128 = -9_007_199_254_740_992;

/// Selects the upper bound for a positive-bounded integer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntBound {
    UInt8,
    Int32,
    UInt32,
    Int64,
    UInt64,
    FloatInteger,
    DoubleInteger,
}

impl IntBound {
    pub fn max(&self) -> i128 {
        match self {
            IntBound::UInt8 => UINT8_MAX,
            IntBound::Int32 => INT32_MAX,
            IntBound::UInt32 => UINT32_MAX,
            IntBound::Int64 => INT64_MAX,
            IntBound::UInt64 => UINT64_MAX,
            IntBound::FloatInteger => FLOAT_MAX_INTEGER,
            IntBound::DoubleInteger => DOUBLE_MAX_INTEGER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntBound::UInt8 => "UINT8_MAX",
            IntBound::Int32 => "INT32_MAX",
            IntBound::UInt32 => "UINT32_MAX",
            IntBound::Int64 => "INT64_MAX",
            IntBound::UInt64 => "UINT64_MAX",
            IntBound::FloatInteger => "FLOAT_MAX_INTEGER",
            IntBound::DoubleInteger => "DOUBLE_MAX_INTEGER",
        }
    }
}
