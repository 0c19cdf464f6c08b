//! Numeric function implementations: ABS, ROUND, CEIL, FLOOR, RAND
//!
//! Results keep the numeric type of the argument.

use super::helpers::check_arity;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use sparql_value::{EvalError, NodeValue, Result, ValueKind};

/// Rounding direction for decimals
#[derive(Clone, Copy)]
enum Rounding {
    Floor,
    Ceil,
    /// Halves toward positive infinity
    HalfUp,
}

fn numeric_mismatch(fn_name: &str, value: &NodeValue) -> EvalError {
    EvalError::type_mismatch(
        format!("a numeric value for {}", fn_name),
        format_args!("{} ({})", value, value.type_name()),
    )
}

/// Floor division on arbitrary precision integers
fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    let q = a / b;
    let r = a % b;
    if !r.is_zero() && (r.is_negative() != b.is_negative()) {
        q - 1
    } else {
        q
    }
}

fn round_decimal(d: &BigDecimal, mode: Rounding) -> BigDecimal {
    let (digits, scale) = d.as_bigint_and_exponent();
    if scale <= 0 {
        return d.clone();
    }
    let divisor = BigInt::from(10).pow(scale as u32);
    let whole = match mode {
        Rounding::Floor => floor_div(&digits, &divisor),
        Rounding::Ceil => -floor_div(&-digits, &divisor),
        Rounding::HalfUp => floor_div(&(digits * 2 + &divisor), &(&divisor * 2)),
    };
    BigDecimal::new(whole, 0)
}

/// Round to the nearest integer, halves toward positive infinity
pub(super) fn round_half_up(x: f64) -> f64 {
    let r = x.round();
    if r - x == -0.5 {
        r + 1.0
    } else {
        r
    }
}

fn round_with(args: &[NodeValue], fn_name: &str, mode: Rounding) -> Result<NodeValue> {
    check_arity(args, 1, fn_name)?;
    let value = &args[0];
    match value.kind() {
        ValueKind::Integer(_) => Ok(value.clone()),
        ValueKind::Decimal(d) => Ok(NodeValue::decimal(round_decimal(d, mode))),
        ValueKind::Float(f) => Ok(NodeValue::float(match mode {
            Rounding::Floor => f.floor(),
            Rounding::Ceil => f.ceil(),
            Rounding::HalfUp => round_half_up(f64::from(*f)) as f32,
        })),
        ValueKind::Double(d) => Ok(NodeValue::double(match mode {
            Rounding::Floor => d.floor(),
            Rounding::Ceil => d.ceil(),
            Rounding::HalfUp => round_half_up(*d),
        })),
        _ => Err(numeric_mismatch(fn_name, value)),
    }
}

pub(super) fn eval_abs(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "ABS")?;
    let value = &args[0];
    match value.kind() {
        ValueKind::Integer(n) => Ok(NodeValue::integer(n.abs())),
        ValueKind::Decimal(d) => Ok(NodeValue::decimal(d.abs())),
        ValueKind::Float(f) => Ok(NodeValue::float(f.abs())),
        ValueKind::Double(d) => Ok(NodeValue::double(d.abs())),
        _ => Err(numeric_mismatch("ABS", value)),
    }
}

pub(super) fn eval_round(args: &[NodeValue]) -> Result<NodeValue> {
    round_with(args, "ROUND", Rounding::HalfUp)
}

pub(super) fn eval_ceil(args: &[NodeValue]) -> Result<NodeValue> {
    round_with(args, "CEIL", Rounding::Ceil)
}

pub(super) fn eval_floor(args: &[NodeValue]) -> Result<NodeValue> {
    round_with(args, "FLOOR", Rounding::Floor)
}

/// RAND(): a double in [0, 1)
pub(super) fn eval_rand(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 0, "RAND")?;
    Ok(NodeValue::double(rand::random::<f64>()))
}
