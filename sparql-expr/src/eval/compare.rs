//! Comparison operator implementations
//!
//! `=` and `!=` use value equality; the relational operators use the value
//! order. A NaN operand makes every relational operator false.

use super::helpers::check_arity;
use crate::context::EvalContext;
use sparql_value::{compare, same_as, NodeValue, Result};
use std::cmp::Ordering;

pub(super) fn eval_eq(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    check_arity(args, 2, "=")?;
    let equal = same_as(&args[0], &args[1], ctx.compare_options())?;
    Ok(NodeValue::boolean(equal))
}

pub(super) fn eval_ne(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    check_arity(args, 2, "!=")?;
    let equal = same_as(&args[0], &args[1], ctx.compare_options())?;
    Ok(NodeValue::boolean(!equal))
}

pub(super) fn eval_lt(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    relational(args, ctx, "<", |o| o == Ordering::Less)
}

pub(super) fn eval_le(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    relational(args, ctx, "<=", |o| o != Ordering::Greater)
}

pub(super) fn eval_gt(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    relational(args, ctx, ">", |o| o == Ordering::Greater)
}

pub(super) fn eval_ge(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    relational(args, ctx, ">=", |o| o != Ordering::Less)
}

fn relational(
    args: &[NodeValue],
    ctx: &EvalContext<'_>,
    op: &str,
    accept: impl Fn(Ordering) -> bool,
) -> Result<NodeValue> {
    check_arity(args, 2, op)?;
    let ordering = compare(&args[0], &args[1], ctx.compare_options())?;
    Ok(NodeValue::boolean(ordering.is_some_and(accept)))
}
