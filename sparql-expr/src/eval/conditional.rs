//! Conditional function implementations: IF, COALESCE, BOUND

use super::helpers::check_arity;
use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::expr::Expression;
use sparql_value::{EvalError, NodeValue, Result};

/// Evaluate IF(cond, then, else)
///
/// Only the selected branch is evaluated.
pub(super) fn eval_if(
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    check_arity(args, 3, "IF")?;
    if args[0].eval_ebv(row, ctx)? {
        args[1].eval(row, ctx)
    } else {
        args[2].eval(row, ctx)
    }
}

/// Evaluate COALESCE(args...)
///
/// Returns the first argument that evaluates without error. When every
/// argument fails, the last error is raised.
pub(super) fn eval_coalesce(
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    let mut last = None;
    for arg in args {
        match arg.eval(row, ctx) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => last = Some(e),
        }
    }
    Err(last.unwrap_or_else(|| EvalError::invalid_argument("COALESCE requires at least one argument")))
}

/// Evaluate BOUND(expr)
///
/// Only the binding status matters: an unbound variable is `false`, any
/// value is `true`.
pub(super) fn eval_bound(
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    check_arity(args, 1, "BOUND")?;
    match args[0].eval(row, ctx) {
        Ok(_) => Ok(NodeValue::boolean(true)),
        Err(e) if e.is_unbound() => Ok(NodeValue::boolean(false)),
        Err(e) => Err(e),
    }
}
