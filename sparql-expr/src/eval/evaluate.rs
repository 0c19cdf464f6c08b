//! Core expression evaluation
//!
//! - `evaluate()` - evaluate to a value (BIND, projection)
//! - `is_satisfied()` - FILTER semantics: any error means "not satisfied"
//! - `try_is_satisfied()` - as above, but fatal errors surface to the caller

use super::exists;
use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::expr::Expression;
use sparql_value::{EvalError, NodeValue, Result};

impl Expression {
    /// Evaluate this expression against a row.
    pub fn evaluate(&self, row: &dyn RowAccess, ctx: &EvalContext<'_>) -> Result<NodeValue> {
        let span = tracing::trace_span!("evaluate", row = row.row_id().as_u64());
        let _guard = span.enter();
        let result = self.eval(row, ctx);
        if let Err(e) = &result {
            tracing::trace!(error = %e, expr = %self, "evaluation failed");
        }
        result
    }

    /// Recursive evaluation step shared by all special forms
    pub(crate) fn eval(&self, row: &dyn RowAccess, ctx: &EvalContext<'_>) -> Result<NodeValue> {
        match self {
            Expression::Const(value) => Ok(value.clone()),
            Expression::Var(var) => row
                .get(var)
                .map(|term| NodeValue::from_term(term.clone()))
                .ok_or_else(|| EvalError::UnboundVariable(var.name().to_string())),
            Expression::Func0 { func }
            | Expression::Func1 { func, .. }
            | Expression::Func2 { func, .. }
            | Expression::Func3 { func, .. }
            | Expression::FuncN { func, .. } => func.eval(self.args(), row, ctx),
            Expression::Exists(op) => exists::eval_exists(op, row, ctx),
            Expression::Aggregate(agg) => row
                .get(&agg.var)
                .map(|term| NodeValue::from_term(term.clone()))
                .ok_or_else(|| EvalError::UnboundVariable(agg.var.name().to_string())),
        }
    }

    /// Effective boolean value of this expression
    pub(crate) fn eval_ebv(&self, row: &dyn RowAccess, ctx: &EvalContext<'_>) -> Result<bool> {
        self.eval(row, ctx)?.ebv()
    }

    /// Evaluate as a FILTER condition.
    ///
    /// Never fails: every evaluation error counts as "not satisfied".
    /// Internal invariant violations are logged as engine bugs.
    pub fn is_satisfied(&self, row: &dyn RowAccess, ctx: &EvalContext<'_>) -> bool {
        match self.eval_ebv(row, ctx) {
            Ok(b) => b,
            Err(e) if e.is_fatal() => {
                tracing::error!(error = %e, expr = %self, "internal invariant violated during filter evaluation");
                debug_assert!(false, "internal invariant violated: {}", e);
                false
            }
            Err(e) => {
                tracing::trace!(error = %e, expr = %self, "filter not satisfied");
                false
            }
        }
    }

    /// FILTER evaluation that lets fatal errors through.
    ///
    /// Ordinary evaluation errors become `Ok(false)`.
    pub fn try_is_satisfied(&self, row: &dyn RowAccess, ctx: &EvalContext<'_>) -> Result<bool> {
        match self.eval_ebv(row, ctx) {
            Ok(b) => Ok(b),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::trace!(error = %e, expr = %self, "filter not satisfied");
                Ok(false)
            }
        }
    }
}
