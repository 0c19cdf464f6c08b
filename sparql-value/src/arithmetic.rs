//! Numeric promotion and arithmetic
//!
//! Operands are promoted along integer → decimal → float → double and the
//! operation runs in the wider type. Integer division is the one exception:
//! it always produces a decimal.

use crate::error::{EvalError, Result};
use crate::value::{NodeValue, ValueKind};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;

/// Fractional digits kept when a decimal quotient does not terminate
pub const DECIMAL_DIVISION_SCALE: i64 = 24;

/// Numeric type lattice, ordered by promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericType {
    Integer,
    Decimal,
    Float,
    Double,
}

impl NumericType {
    pub fn of(value: &NodeValue) -> Option<Self> {
        match value.kind() {
            ValueKind::Integer(_) => Some(NumericType::Integer),
            ValueKind::Decimal(_) => Some(NumericType::Decimal),
            ValueKind::Float(_) => Some(NumericType::Float),
            ValueKind::Double(_) => Some(NumericType::Double),
            _ => None,
        }
    }
}

/// Two operands promoted to their common type
enum Promoted {
    Integer(BigInt, BigInt),
    Decimal(BigDecimal, BigDecimal),
    Float(f32, f32),
    Double(f64, f64),
}

fn promote(left: &NodeValue, right: &NodeValue) -> Result<Promoted> {
    let (Some(lt), Some(rt)) = (NumericType::of(left), NumericType::of(right)) else {
        let culprit = if left.is_numeric() { right } else { left };
        return Err(EvalError::type_mismatch(
            "a numeric value",
            format_args!("{} ({})", culprit, culprit.type_name()),
        ));
    };
    Ok(match lt.max(rt) {
        NumericType::Integer => {
            Promoted::Integer(left.as_integer()?.clone(), right.as_integer()?.clone())
        }
        NumericType::Decimal => Promoted::Decimal(left.as_decimal()?, right.as_decimal()?),
        NumericType::Float => Promoted::Float(left.as_float()?, right.as_float()?),
        NumericType::Double => Promoted::Double(left.as_double()?, right.as_double()?),
    })
}

/// Compare two numeric values after promotion.
///
/// `None` when either side is not numeric or the pair is unordered (NaN).
pub fn numeric_cmp(left: &NodeValue, right: &NodeValue) -> Option<Ordering> {
    match promote(left, right).ok()? {
        Promoted::Integer(a, b) => Some(a.cmp(&b)),
        Promoted::Decimal(a, b) => Some(a.cmp(&b)),
        Promoted::Float(a, b) => a.partial_cmp(&b),
        Promoted::Double(a, b) => a.partial_cmp(&b),
    }
}

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }

    /// Apply the operator to two numeric values
    pub fn apply(self, left: &NodeValue, right: &NodeValue) -> Result<NodeValue> {
        match promote(left, right)? {
            Promoted::Integer(a, b) => Ok(match self {
                ArithmeticOp::Add => NodeValue::integer(a + b),
                ArithmeticOp::Sub => NodeValue::integer(a - b),
                ArithmeticOp::Mul => NodeValue::integer(a * b),
                ArithmeticOp::Div => {
                    NodeValue::decimal(divide_decimal(BigDecimal::new(a, 0), BigDecimal::new(b, 0))?)
                }
            }),
            Promoted::Decimal(a, b) => Ok(NodeValue::decimal(match self {
                ArithmeticOp::Add => a + b,
                ArithmeticOp::Sub => a - b,
                ArithmeticOp::Mul => a * b,
                ArithmeticOp::Div => divide_decimal(a, b)?,
            })),
            Promoted::Float(a, b) => Ok(NodeValue::float(match self {
                ArithmeticOp::Add => a + b,
                ArithmeticOp::Sub => a - b,
                ArithmeticOp::Mul => a * b,
                ArithmeticOp::Div => a / b,
            })),
            Promoted::Double(a, b) => Ok(NodeValue::double(match self {
                ArithmeticOp::Add => a + b,
                ArithmeticOp::Sub => a - b,
                ArithmeticOp::Mul => a * b,
                ArithmeticOp::Div => a / b,
            })),
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn divide_decimal(a: BigDecimal, b: BigDecimal) -> Result<BigDecimal> {
    if b.is_zero() {
        return Err(EvalError::DivideByZero);
    }
    let quotient = &a / &b;
    if &quotient * &b == a {
        Ok(quotient.normalized())
    } else {
        Ok(quotient.round(DECIMAL_DIVISION_SCALE))
    }
}

/// Unary minus
pub fn negate(value: &NodeValue) -> Result<NodeValue> {
    match value.kind() {
        ValueKind::Integer(n) => Ok(NodeValue::integer(-n)),
        ValueKind::Decimal(d) => Ok(NodeValue::decimal(-d.clone())),
        ValueKind::Float(f) => Ok(NodeValue::float(-f)),
        ValueKind::Double(d) => Ok(NodeValue::double(-d)),
        _ => Err(EvalError::type_mismatch(
            "a numeric value",
            format_args!("{} ({})", value, value.type_name()),
        )),
    }
}

/// Unary plus: the operand itself, provided it is numeric
pub fn plus(value: &NodeValue) -> Result<NodeValue> {
    if value.is_numeric() {
        Ok(value.clone())
    } else {
        Err(EvalError::type_mismatch(
            "a numeric value",
            format_args!("{} ({})", value, value.type_name()),
        ))
    }
}
