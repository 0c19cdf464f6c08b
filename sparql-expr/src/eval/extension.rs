//! Extension functions: CALL(iri, args...) and bound custom functions
//!
//! The callable receives the remaining arguments unevaluated.

use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::expr::Expression;
use crate::function::CustomFunction;
use crate::registry::ResolverCache;
use sparql_value::{EvalError, NodeValue, Result, Term};

pub(super) fn eval_call(
    cache: &ResolverCache,
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    let Some((target, rest)) = args.split_first() else {
        return Err(EvalError::invalid_argument("CALL requires a function IRI"));
    };
    let target = target.eval(row, ctx)?;
    let Term::Iri(iri) = target.as_term() else {
        return Err(EvalError::type_mismatch(
            "an IRI for CALL",
            format_args!("{} ({})", target, target.type_name()),
        ));
    };
    invoke(cache, iri, rest, row, ctx)
}

pub(super) fn eval_custom(
    custom: &CustomFunction,
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    invoke(&custom.cache, &custom.iri, args, row, ctx)
}

fn invoke(
    cache: &ResolverCache,
    iri: &str,
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    let callable = ctx
        .registry()
        .and_then(|registry| cache.resolve(iri, registry))
        .ok_or_else(|| EvalError::FunctionNotBound(iri.to_string()))?;
    tracing::trace!(iri, args = args.len(), "invoking extension function");
    (*callable)(args, row, ctx)
}
