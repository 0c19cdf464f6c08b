//! Arithmetic operator implementations

use super::helpers::check_arity;
use sparql_value::{negate, plus, ArithmeticOp, NodeValue, Result};

pub(super) fn eval_add(args: &[NodeValue]) -> Result<NodeValue> {
    binary(args, ArithmeticOp::Add)
}

pub(super) fn eval_sub(args: &[NodeValue]) -> Result<NodeValue> {
    binary(args, ArithmeticOp::Sub)
}

pub(super) fn eval_mul(args: &[NodeValue]) -> Result<NodeValue> {
    binary(args, ArithmeticOp::Mul)
}

pub(super) fn eval_div(args: &[NodeValue]) -> Result<NodeValue> {
    binary(args, ArithmeticOp::Div)
}

fn binary(args: &[NodeValue], op: ArithmeticOp) -> Result<NodeValue> {
    check_arity(args, 2, op.symbol())?;
    op.apply(&args[0], &args[1])
}

pub(super) fn eval_negate(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "unary -")?;
    negate(&args[0])
}

pub(super) fn eval_plus(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "unary +")?;
    plus(&args[0])
}
