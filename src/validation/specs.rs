//! The per-op validator table.
//!
//! Each entry is configuration: a signature plus the ordered checks for it.
use super::limits::IntBound;
use super::spec::{Rule, ValidatorSpec};
use crate::args::{ArgKind, ArgValue, DataType, Param};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every constructible op that has a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpKind {
    Fill,
    OneHot,
    OneHotHard,
    TypeCast,
    Slice,
    Mask,
    PadEnd,
    Concatenate,
    Compose,
    RandomApply,
    RandomChoice,
    RandomOrder,
}

impl OpKind {
    pub const ALL: [OpKind; 12] = [
        OpKind::Fill,
        OpKind::OneHot,
        OpKind::OneHotHard,
        OpKind::TypeCast,
        OpKind::Slice,
        OpKind::Mask,
        OpKind::PadEnd,
        OpKind::Concatenate,
        OpKind::Compose,
        OpKind::RandomApply,
        OpKind::RandomChoice,
        OpKind::RandomOrder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Fill => "Fill",
            OpKind::OneHot => "OneHot",
            OpKind::OneHotHard => "OneHotHard",
            OpKind::TypeCast => "TypeCast",
            OpKind::Slice => "Slice",
            OpKind::Mask => "Mask",
            OpKind::PadEnd => "PadEnd",
            OpKind::Concatenate => "Concatenate",
            OpKind::Compose => "Compose",
            OpKind::RandomApply => "RandomApply",
            OpKind::RandomChoice => "RandomChoice",
            OpKind::RandomOrder => "RandomOrder",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No validator is registered for op '{0}'")]
pub struct UnknownOp(pub String);

impl FromStr for OpKind {
    type Err = UnknownOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpKind::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOp(s.to_string()))
    }
}

const SCALAR: &[ArgKind] = &[ArgKind::Text, ArgKind::Float, ArgKind::Bool, ArgKind::Integer, ArgKind::Bytes];
const INT: &[ArgKind] = &[ArgKind::Integer];
const NUMBER: &[ArgKind] = &[ArgKind::Float, ArgKind::Integer];
const LIST: &[ArgKind] = &[ArgKind::Sequence];
const DTYPE: &[ArgKind] = &[ArgKind::DType];
const SLICE_ITEM: &[ArgKind] = &[
    ArgKind::Integer,
    ArgKind::Slice,
    ArgKind::Sequence,
    ArgKind::Absent,
    ArgKind::Ellipsis,
];

fn transform_list() -> Vec<Rule> {
    vec![Rule::one_of(LIST), Rule::NonEmpty, Rule::KnownOps]
}

fn probability() -> Vec<Rule> {
    vec![Rule::one_of(NUMBER), Rule::in_range(0.0, 1.0)]
}

/// Builds the validator for `op`.
pub(crate) fn spec_for(op: OpKind) -> ValidatorSpec {
    match op {
        OpKind::Fill => ValidatorSpec::new(op, vec![Param::required("fill_value")])
            .check("fill_value", vec![Rule::one_of(SCALAR)]),

        OpKind::OneHot => ValidatorSpec::new(
            op,
            vec![Param::required("num_classes"), Param::optional("smoothing_rate", 0.0)],
        )
        .check("num_classes", vec![Rule::one_of(INT), Rule::Positive])
        .check_present("smoothing_rate", probability()),

        OpKind::OneHotHard => ValidatorSpec::new(op, vec![Param::required("num_classes")])
            .check("num_classes", vec![Rule::one_of(INT), Rule::Positive]),

        OpKind::TypeCast => ValidatorSpec::new(op, vec![Param::required("data_type")])
            .check("data_type", vec![Rule::one_of(DTYPE)]),

        OpKind::Slice => ValidatorSpec::new(op, vec![Param::variadic("slices")]).check(
            "slices",
            vec![Rule::each(vec![
                Rule::one_of(SLICE_ITEM),
                Rule::each(vec![Rule::one_of(INT)]),
            ])],
        ),

        OpKind::Mask => ValidatorSpec::new(
            op,
            vec![
                Param::required("operator"),
                Param::required("constant"),
                Param::optional("dtype", DataType::Bool),
            ],
        )
        .check("operator", vec![Rule::one_of(&[ArgKind::Relational])])
        .check("constant", vec![Rule::one_of(SCALAR)])
        .check("dtype", vec![Rule::one_of(DTYPE)]),

        OpKind::PadEnd => ValidatorSpec::new(
            op,
            vec![Param::required("pad_shape"), Param::optional("pad_value", ArgValue::Absent)],
        )
        .check_present("pad_value", vec![Rule::one_of(SCALAR)])
        .check("pad_shape", vec![Rule::one_of(LIST), Rule::Shape { bound: IntBound::Int64 }]),

        OpKind::Concatenate => ValidatorSpec::new(
            op,
            vec![
                Param::optional("axis", 0),
                Param::optional("prepend", ArgValue::Absent),
                Param::optional("append", ArgValue::Absent),
            ],
        )
        .check_present("axis", vec![Rule::one_of(INT), Rule::Enumerated { values: vec![0, -1] }])
        .check_present("prepend", vec![Rule::one_of(&[ArgKind::Array]), Rule::OneDimensional])
        .check_present("append", vec![Rule::one_of(&[ArgKind::Array]), Rule::OneDimensional]),

        OpKind::Compose | OpKind::RandomChoice => {
            ValidatorSpec::new(op, vec![Param::required("transforms")]).check("transforms", transform_list())
        }

        OpKind::RandomApply => ValidatorSpec::new(
            op,
            vec![Param::required("transforms"), Param::optional("prob", 0.5)],
        )
        .check("transforms", transform_list())
        .check_present("prob", probability()),

        OpKind::RandomOrder => ValidatorSpec::new(op, vec![Param::required("transforms")])
            .check("transforms", vec![Rule::one_of(LIST)]),
    }
}
