//! EXISTS / NOT EXISTS

use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::plan::ExistsOp;
use sparql_value::{EvalError, NodeValue, Result};

/// Run the embedded plan with `row` as its only input row
pub(super) fn eval_exists(
    op: &ExistsOp,
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    let executor = ctx
        .executor()
        .ok_or_else(|| EvalError::SubPlan("no sub-plan executor in the evaluation context".to_string()))?;
    let found = executor.exists(op.plan.as_ref(), row, ctx)?;
    tracing::trace!(found, negated = op.negated, "sub-plan evaluated");
    Ok(NodeValue::boolean(found != op.negated))
}
