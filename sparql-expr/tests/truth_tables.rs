//! Three-valued logic for `&&`, `||` and `!`
//!
//! Operands are true, false or an error (a reference to an unbound
//! variable). Every cell of the SPARQL tables is checked.

mod support;

use sparql_expr::{EvalContext, EvalError, Expression};
use support::{empty_row, eval, FnExecutor, MockPlan};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tv {
    T,
    F,
    E,
}

use Tv::{E, F, T};

fn operand(tv: Tv, err_var: &str) -> Expression {
    match tv {
        T => Expression::constant(true),
        F => Expression::constant(false),
        E => Expression::var(err_var),
    }
}

fn outcome(expr: &Expression) -> Tv {
    match eval(expr, &empty_row()) {
        Ok(v) if v.as_boolean() == Ok(true) => T,
        Ok(v) if v.as_boolean() == Ok(false) => F,
        Ok(v) => panic!("{} produced a non-boolean {}", expr, v),
        Err(_) => E,
    }
}

const CASES: [(Tv, Tv); 9] = [
    (T, T),
    (T, F),
    (T, E),
    (F, T),
    (F, F),
    (F, E),
    (E, T),
    (E, F),
    (E, E),
];

#[test]
fn and_truth_table() {
    let expected = [T, F, E, F, F, F, E, F, E];
    for ((l, r), want) in CASES.iter().zip(expected) {
        let e = Expression::and(operand(*l, "a"), operand(*r, "b"));
        assert_eq!(outcome(&e), want, "{:?} && {:?}", l, r);
    }
}

#[test]
fn or_truth_table() {
    let expected = [T, T, T, T, F, E, T, E, E];
    for ((l, r), want) in CASES.iter().zip(expected) {
        let e = Expression::or(operand(*l, "a"), operand(*r, "b"));
        assert_eq!(outcome(&e), want, "{:?} || {:?}", l, r);
    }
}

#[test]
fn not_truth_table() {
    for (input, want) in [(T, F), (F, T), (E, E)] {
        assert_eq!(outcome(&Expression::not(operand(input, "a"))), want);
    }
}

#[test]
fn left_error_is_reported_when_both_sides_fail() {
    let e = Expression::and(Expression::var("a"), Expression::var("b"));
    assert_eq!(
        eval(&e, &empty_row()),
        Err(EvalError::UnboundVariable("a".to_string()))
    );
    let e = Expression::or(Expression::var("a"), Expression::var("b"));
    assert_eq!(
        eval(&e, &empty_row()),
        Err(EvalError::UnboundVariable("a".to_string()))
    );
}

#[test]
fn deciding_left_operand_skips_right() {
    let executor = FnExecutor::new(|_, _| true);
    let ctx = EvalContext::new().with_executor(&executor);
    let sub_plan = || Expression::exists(MockPlan::new("ask", &[]).into_arc());

    let e = Expression::and(Expression::constant(false), sub_plan());
    assert!(!e.is_satisfied(&empty_row(), &ctx));
    let e = Expression::or(Expression::constant(true), sub_plan());
    assert!(e.is_satisfied(&empty_row(), &ctx));
    assert_eq!(executor.calls(), 0);

    let e = Expression::and(Expression::constant(true), sub_plan());
    assert!(e.is_satisfied(&empty_row(), &ctx));
    assert_eq!(executor.calls(), 1);
}

#[test]
fn non_boolean_operands_use_effective_boolean_value() {
    let e = Expression::and(Expression::constant("x"), Expression::constant(2));
    assert_eq!(outcome(&e), T);
    let e = Expression::or(Expression::constant(""), Expression::constant(0));
    assert_eq!(outcome(&e), F);
    // IRIs have no effective boolean value
    let e = Expression::and(Expression::iri("http://example.org/a"), Expression::constant(true));
    assert_eq!(outcome(&e), E);
}
