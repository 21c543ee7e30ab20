//! Enumerations stored in integer attributes.
//!
//! Nodes keep these as plain `Int` values so that the host representation stays
//! a flat number; the schema restricts the integer to the enumeration's range.
use strum::{Display, EnumCount, EnumIter, FromRepr};

use crate::{error::Error, value::NodeValue};

macro_rules! int_enum {
    ($name:ident) => {
        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = Error;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::from_repr(value).ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "{} is not a valid {}",
                        value,
                        stringify!($name)
                    ))
                })
            }
        }

        impl From<$name> for NodeValue {
            fn from(value: $name) -> Self {
                NodeValue::Int(value as i32)
            }
        }

        impl TryFrom<NodeValue> for $name {
            type Error = Error;

            fn try_from(value: NodeValue) -> Result<Self, Self::Error> {
                Self::try_from(i32::try_from(value)?)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum Sign {
    #[strum(to_string = "")]
    NoSign = 0,
    #[strum(to_string = "not ")]
    Negation = 1,
    #[strum(to_string = "not not ")]
    DoubleNegation = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum ComparisonOperator {
    #[strum(to_string = ">")]
    GreaterThan = 0,
    #[strum(to_string = "<")]
    LessThan = 1,
    #[strum(to_string = "<=")]
    LessEqual = 2,
    #[strum(to_string = ">=")]
    GreaterEqual = 3,
    #[strum(to_string = "!=")]
    NotEqual = 4,
    #[strum(to_string = "=")]
    Equal = 5,
}

impl ComparisonOperator {
    /// The operator obtained by swapping both operands.
    pub fn flip(self) -> Self {
        match self {
            ComparisonOperator::GreaterThan => ComparisonOperator::LessThan,
            ComparisonOperator::LessThan => ComparisonOperator::GreaterThan,
            ComparisonOperator::LessEqual => ComparisonOperator::GreaterEqual,
            ComparisonOperator::GreaterEqual => ComparisonOperator::LessEqual,
            op => op,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum UnaryOperator {
    #[strum(to_string = "-")]
    Minus = 0,
    #[strum(to_string = "~")]
    Negation = 1,
    #[strum(to_string = "|")]
    Absolute = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum BinaryOperator {
    #[strum(to_string = "^")]
    Xor = 0,
    #[strum(to_string = "?")]
    Or = 1,
    #[strum(to_string = "&")]
    And = 2,
    #[strum(to_string = "+")]
    Plus = 3,
    #[strum(to_string = "-")]
    Minus = 4,
    #[strum(to_string = "*")]
    Multiplication = 5,
    #[strum(to_string = "/")]
    Division = 6,
    #[strum(to_string = "\\")]
    Modulo = 7,
    #[strum(to_string = "**")]
    Power = 8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum AggregateFunction {
    #[strum(to_string = "#count")]
    Count = 0,
    #[strum(to_string = "#sum")]
    Sum = 1,
    #[strum(to_string = "#sum+")]
    SumPlus = 2,
    #[strum(to_string = "#min")]
    Min = 3,
    #[strum(to_string = "#max")]
    Max = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum TheorySequenceType {
    Tuple = 0,
    List = 1,
    Set = 2,
}

impl TheorySequenceType {
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            TheorySequenceType::Tuple => ("(", ")"),
            TheorySequenceType::List => ("[", "]"),
            TheorySequenceType::Set => ("{", "}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum TheoryOperatorType {
    #[strum(to_string = "unary")]
    Unary = 0,
    #[strum(to_string = "binary, left")]
    BinaryLeft = 1,
    #[strum(to_string = "binary, right")]
    BinaryRight = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr)]
#[repr(i32)]
pub enum TheoryAtomType {
    #[strum(to_string = "head")]
    Head = 0,
    #[strum(to_string = "body")]
    Body = 1,
    #[strum(to_string = "any")]
    Any = 2,
    #[strum(to_string = "directive")]
    Directive = 3,
}

int_enum!(Sign);
int_enum!(ComparisonOperator);
int_enum!(UnaryOperator);
int_enum!(BinaryOperator);
int_enum!(AggregateFunction);
int_enum!(TheorySequenceType);
int_enum!(TheoryOperatorType);
int_enum!(TheoryAtomType);
