//! Logical operator implementations
//!
//! AND and OR follow the SPARQL three-valued truth tables: an error on one
//! side is absorbed when the other side alone decides the result. When both
//! sides error, the left error is reported. Fatal errors are never absorbed.

use super::helpers::check_arity;
use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::expr::Expression;
use sparql_value::{same_as, EvalError, NodeValue, Result};

/// Evaluate logical AND
pub(super) fn eval_and(
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    check_arity(args, 2, "&&")?;
    let left = args[0].eval_ebv(row, ctx);
    match &left {
        Ok(false) => return Ok(NodeValue::boolean(false)),
        Err(e) if e.is_fatal() => return Err(e.clone()),
        _ => {}
    }
    match args[1].eval_ebv(row, ctx) {
        Ok(false) => Ok(NodeValue::boolean(false)),
        Ok(true) => left.map(NodeValue::boolean),
        Err(right) if right.is_fatal() => Err(right),
        Err(right) => Err(left.err().unwrap_or(right)),
    }
}

/// Evaluate logical OR
pub(super) fn eval_or(
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
) -> Result<NodeValue> {
    check_arity(args, 2, "||")?;
    let left = args[0].eval_ebv(row, ctx);
    match &left {
        Ok(true) => return Ok(NodeValue::boolean(true)),
        Err(e) if e.is_fatal() => return Err(e.clone()),
        _ => {}
    }
    match args[1].eval_ebv(row, ctx) {
        Ok(true) => Ok(NodeValue::boolean(true)),
        Ok(false) => left.map(NodeValue::boolean),
        Err(right) if right.is_fatal() => Err(right),
        Err(right) => Err(left.err().unwrap_or(right)),
    }
}

/// Evaluate logical NOT
pub(super) fn eval_not(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "!")?;
    Ok(NodeValue::boolean(!args[0].ebv()?))
}

/// Evaluate IN / NOT IN
///
/// The first member equal to the needle decides the result. A member that
/// errors is remembered; if no member matched, the last such error is
/// raised instead of `false`.
pub(super) fn eval_in(
    args: &[Expression],
    row: &dyn RowAccess,
    ctx: &EvalContext<'_>,
    negated: bool,
) -> Result<NodeValue> {
    let Some((needle, members)) = args.split_first() else {
        return Err(EvalError::invalid_argument("IN requires a left-hand expression"));
    };
    let needle = needle.eval(row, ctx)?;
    let mut deferred = None;
    for member in members {
        let outcome = member
            .eval(row, ctx)
            .and_then(|value| same_as(&needle, &value, ctx.compare_options()));
        match outcome {
            Ok(true) => return Ok(NodeValue::boolean(!negated)),
            Ok(false) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => deferred = Some(e),
        }
    }
    match deferred {
        Some(e) => Err(e),
        None => Ok(NodeValue::boolean(negated)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingRow;

    fn eval(e: &Expression) -> Result<NodeValue> {
        e.evaluate(&BindingRow::new(), &EvalContext::new())
    }

    fn unbound() -> Expression {
        Expression::var("missing")
    }

    #[test]
    fn test_and_absorbs_left_error_when_right_is_false() {
        let e = Expression::and(unbound(), Expression::constant(false));
        assert_eq!(eval(&e).unwrap().as_boolean(), Ok(false));
    }

    #[test]
    fn test_and_short_circuits() {
        // The right side would be a type error; it is never evaluated.
        let e = Expression::and(
            Expression::constant(false),
            Expression::not(Expression::iri("http://ex.org/x")),
        );
        assert_eq!(eval(&e).unwrap().as_boolean(), Ok(false));
    }

    #[test]
    fn test_or_reports_left_error_when_both_fail() {
        let e = Expression::or(
            unbound(),
            Expression::not(Expression::iri("http://ex.org/x")),
        );
        assert_eq!(
            eval(&e),
            Err(EvalError::UnboundVariable("missing".to_string()))
        );
    }

    #[test]
    fn test_in_list() {
        let e = Expression::in_list(
            Expression::constant(2),
            vec![Expression::constant(1), Expression::constant(2.0)],
        );
        assert_eq!(eval(&e).unwrap().as_boolean(), Ok(true));

        let e = Expression::not_in(Expression::constant(3), vec![Expression::constant(1)]);
        assert_eq!(eval(&e).unwrap().as_boolean(), Ok(true));

        let e = Expression::in_list(Expression::constant(3), vec![]);
        assert_eq!(eval(&e).unwrap().as_boolean(), Ok(false));
    }

    #[test]
    fn test_in_match_wins_over_member_error() {
        let e = Expression::in_list(
            Expression::constant(1),
            vec![unbound(), Expression::constant(1)],
        );
        assert_eq!(eval(&e).unwrap().as_boolean(), Ok(true));

        let e = Expression::in_list(
            Expression::constant(1),
            vec![unbound(), Expression::constant(2)],
        );
        assert!(eval(&e).is_err());
    }
}
