//! End-to-end evaluation scenarios against single rows

mod support;

use sparql_expr::{
    AggregateFn, Aggregator, Callable, EvalContext, EvalError, EvalOptions, Expression, Function,
    FunctionRegistry, NodeValue, RowAccess, SimpleRegistry, Term, Var,
};
use sparql_value::vocab::xsd;
use sparql_value::ComparisonKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use support::{empty_row, eval, int, iri, row, string, FnExecutor, MockPlan};

// =============================================================================
// Conditionals
// =============================================================================

#[test]
fn coalesce_skips_unbound() {
    let e = Expression::coalesce(vec![Expression::var("x"), Expression::constant("a")]);
    assert_eq!(eval(&e, &empty_row()), Ok(NodeValue::string("a")));
}

#[test]
fn coalesce_of_only_errors_fails() {
    let e = Expression::coalesce(vec![
        Expression::var("x"),
        Expression::div(Expression::constant(1), Expression::constant(0)),
    ]);
    assert!(eval(&e, &empty_row()).is_err());
}

#[test]
fn if_chooses_branch_by_condition() {
    let e = Expression::if_then_else(
        Expression::eq(Expression::var("x"), Expression::constant(1)),
        Expression::constant("yes"),
        Expression::constant("no"),
    );
    assert_eq!(eval(&e, &row(&[("x", int(1))])), Ok(NodeValue::string("yes")));
    assert_eq!(eval(&e, &row(&[("x", int(2))])), Ok(NodeValue::string("no")));

    // A string is not comparable with an integer; IF must not pick a branch.
    let err = eval(&e, &row(&[("x", string("1"))])).unwrap_err();
    assert!(matches!(
        err,
        EvalError::Incomparable {
            kind: ComparisonKind::Equality,
            ..
        }
    ));
}

#[test]
fn bound_only_looks_at_presence() {
    let e = Expression::bound("x");
    let ill_formed = Term::typed("abc", xsd::INTEGER);
    assert_eq!(eval(&e, &row(&[("x", ill_formed)])), Ok(NodeValue::boolean(true)));
    assert_eq!(eval(&e, &row(&[("x", int(0))])), Ok(NodeValue::boolean(true)));
    assert_eq!(eval(&e, &row(&[("y", int(0))])), Ok(NodeValue::boolean(false)));
}

#[test]
fn filter_drops_rows_on_error() {
    let e = Expression::gt(Expression::var("age"), Expression::constant(18));
    let ctx = EvalContext::new();
    assert!(e.is_satisfied(&row(&[("age", int(30))]), &ctx));
    assert!(!e.is_satisfied(&row(&[("age", int(3))]), &ctx));
    assert!(!e.is_satisfied(&row(&[("age", string("old"))]), &ctx));
    assert!(!e.is_satisfied(&empty_row(), &ctx));
    assert_eq!(e.try_is_satisfied(&empty_row(), &ctx), Ok(false));
}

// =============================================================================
// IN / NOT IN
// =============================================================================

#[test]
fn in_list_semantics() {
    let two = || Expression::constant(2);
    let e = Expression::in_list(two(), vec![Expression::constant(1), Expression::constant(2)]);
    assert_eq!(eval(&e, &empty_row()), Ok(NodeValue::boolean(true)));

    // A later match wins over an earlier member error
    let e = Expression::in_list(two(), vec![Expression::var("u"), Expression::constant(2)]);
    assert_eq!(eval(&e, &empty_row()), Ok(NodeValue::boolean(true)));

    // No match and a member error: the error is raised
    let e = Expression::in_list(two(), vec![Expression::constant(1), Expression::var("u")]);
    assert_eq!(
        eval(&e, &empty_row()),
        Err(EvalError::UnboundVariable("u".to_string()))
    );

    let e = Expression::in_list(two(), vec![]);
    assert_eq!(eval(&e, &empty_row()), Ok(NodeValue::boolean(false)));

    let e = Expression::not_in(two(), vec![Expression::constant(1), Expression::constant(3)]);
    assert_eq!(eval(&e, &empty_row()), Ok(NodeValue::boolean(true)));
    let e = Expression::not_in(two(), vec![Expression::constant("2.0"), Expression::constant(2)]);
    assert_eq!(eval(&e, &empty_row()), Ok(NodeValue::boolean(false)));
}

// =============================================================================
// EXISTS
// =============================================================================

#[test]
fn exists_runs_the_plan_against_the_row() {
    let executor = FnExecutor::new(|_, row: &dyn RowAccess| row.contains(&Var::new("s")));
    let ctx = EvalContext::new().with_executor(&executor);
    let plan = MockPlan::new("p", &["s", "o"]).into_arc();

    let exists = Expression::exists(plan.clone());
    let not_exists = Expression::not_exists(plan);
    let with_s = row(&[("s", iri("http://example.org/a"))]);

    assert!(exists.is_satisfied(&with_s, &ctx));
    assert!(!exists.is_satisfied(&empty_row(), &ctx));
    assert!(!not_exists.is_satisfied(&with_s, &ctx));
    assert!(not_exists.is_satisfied(&empty_row(), &ctx));
    assert_eq!(executor.calls(), 4);
}

#[test]
fn exists_without_executor_is_an_error() {
    let e = Expression::exists(MockPlan::new("p", &[]).into_arc());
    assert!(matches!(eval(&e, &empty_row()), Err(EvalError::SubPlan(_))));
}

// =============================================================================
// Extension functions
// =============================================================================

struct CountingRegistry {
    inner: SimpleRegistry,
    lookups: AtomicUsize,
}

impl CountingRegistry {
    fn new(inner: SimpleRegistry) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl FunctionRegistry for CountingRegistry {
    fn resolve(&self, iri: &str) -> Option<Callable> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(iri)
    }
}

const SHOUT: &str = "http://example.org/fn/shout";
const ARGC: &str = "http://example.org/fn/argc";
const MISSING: &str = "http://example.org/fn/missing";

fn registry() -> CountingRegistry {
    let functions = SimpleRegistry::new()
        .with(SHOUT, |args, row, ctx| {
            let value = args[0].evaluate(row, ctx)?;
            Ok(NodeValue::string(value.lexical_form().to_uppercase()))
        })
        // Never evaluates its arguments
        .with(ARGC, |args, _row, _ctx| Ok(NodeValue::integer(args.len() as i64)));
    CountingRegistry::new(functions)
}

#[test]
fn call_resolves_once_per_tree() {
    let registry = registry();
    let ctx = EvalContext::new().with_registry(&registry);
    let e = Expression::call_iri(SHOUT, vec![Expression::var("name")]);

    for name in ["ada", "grace", "barbara"] {
        let r = row(&[("name", string(name))]);
        assert_eq!(
            e.evaluate(&r, &ctx),
            Ok(NodeValue::string(name.to_uppercase()))
        );
    }
    assert_eq!(registry.lookups(), 1);

    // Clones share the cache
    let copy = e.clone();
    copy.evaluate(&row(&[("name", string("x"))]), &ctx).unwrap();
    assert_eq!(registry.lookups(), 1);
}

#[test]
fn unknown_function_is_cached_as_unbound() {
    let registry = registry();
    let ctx = EvalContext::new().with_registry(&registry);
    let e = Expression::custom(MISSING, vec![]);
    for _ in 0..3 {
        assert_eq!(
            e.evaluate(&empty_row(), &ctx),
            Err(EvalError::FunctionNotBound(MISSING.to_string()))
        );
    }
    assert_eq!(registry.lookups(), 1);
    match e.function() {
        Some(Function::Custom(custom)) => assert!(custom.cache.is_cached(MISSING)),
        other => panic!("expected a custom function node, got {:?}", other),
    }
}

#[test]
fn extension_functions_receive_unevaluated_arguments() {
    let registry = registry();
    let ctx = EvalContext::new().with_registry(&registry);
    let e = Expression::custom(ARGC, vec![Expression::var("nope"), Expression::var("nada")]);
    assert_eq!(e.evaluate(&empty_row(), &ctx), Ok(NodeValue::integer(2)));
}

#[test]
fn call_target_must_be_an_iri() {
    let registry = registry();
    let ctx = EvalContext::new().with_registry(&registry);
    let e = Expression::call(Function::call(), vec![Expression::constant("not an iri")]);
    assert!(matches!(
        e.evaluate(&empty_row(), &ctx),
        Err(EvalError::TypeMismatch { .. })
    ));
}

#[test]
fn extension_without_registry_is_unbound() {
    let e = Expression::call_iri(SHOUT, vec![Expression::constant("x")]);
    assert_eq!(
        eval(&e, &empty_row()),
        Err(EvalError::FunctionNotBound(SHOUT.to_string()))
    );
}

// =============================================================================
// Term constructors and context
// =============================================================================

#[test]
fn bnode_labels_are_stable_within_a_row() {
    let ctx = EvalContext::new();
    let keyed = Expression::call(Function::Bnode, vec![Expression::var("k")]);
    let r1 = row(&[("k", string("a"))]);
    let r2 = row(&[("k", string("a"))]);

    let first = keyed.evaluate(&r1, &ctx).unwrap();
    let again = keyed.evaluate(&r1, &ctx).unwrap();
    let other_row = keyed.evaluate(&r2, &ctx).unwrap();
    assert!(first.is_blank());
    assert_eq!(first, again);
    assert_ne!(first, other_row);

    let fresh = Expression::call(Function::Bnode, vec![]);
    let a = fresh.evaluate(&r1, &ctx).unwrap();
    let b = fresh.evaluate(&r1, &ctx).unwrap();
    assert_ne!(a, b);
}

#[test]
fn bnode_state_does_not_grow_with_rows() {
    let ctx = EvalContext::new();
    let keyed = Expression::call(Function::Bnode, vec![Expression::var("k")]);
    let mut labels = std::collections::HashSet::new();
    for i in 0..10_000 {
        let r = row(&[("k", string(if i % 2 == 0 { "even" } else { "odd" }))]);
        let first = keyed.evaluate(&r, &ctx).unwrap();
        assert_eq!(keyed.evaluate(&r, &ctx).unwrap(), first);
        labels.insert(first);
    }
    assert_eq!(labels.len(), 10_000);
    assert_eq!(ctx.tracked_rows(), 1);
}

#[test]
fn iri_resolves_against_base() {
    let ctx = EvalContext::new()
        .with_options(EvalOptions::new().with_base_iri("http://example.org/x/y"));
    let e = Expression::call(Function::Iri, vec![Expression::constant("a/b")]);
    assert_eq!(
        e.evaluate(&empty_row(), &ctx),
        Ok(NodeValue::iri("http://example.org/x/a/b"))
    );
}

#[test]
fn now_is_fixed_per_context() {
    let ctx = EvalContext::new();
    let e = Expression::call(Function::Now, vec![]);
    let a = e.evaluate(&empty_row(), &ctx).unwrap();
    let b = e.evaluate(&empty_row(), &ctx).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.datatype_iri(), Some(xsd::DATE_TIME));
}

#[test]
fn value_extensions_can_be_disabled() {
    let a = Expression::term(Term::typed("2024-01-01", xsd::DATE));
    let b = Expression::term(Term::typed("2024-01-02", xsd::DATE));
    let lt = Expression::lt(a.clone(), b.clone());
    let eq = Expression::eq(a.clone(), a.clone());

    let extended = EvalContext::new();
    assert_eq!(lt.evaluate(&empty_row(), &extended), Ok(NodeValue::boolean(true)));

    let strict = EvalContext::new().with_options(EvalOptions::new().with_value_extensions(false));
    assert!(lt.evaluate(&empty_row(), &strict).is_err());
    assert_eq!(eq.evaluate(&empty_row(), &strict), Ok(NodeValue::boolean(true)));
    assert_eq!(
        Expression::eq(a, b).evaluate(&empty_row(), &strict),
        Ok(NodeValue::boolean(false))
    );
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn aggregate_placeholder_reads_the_row() {
    let e = Expression::gt(
        Expression::aggregate(
            "_agg0",
            Aggregator::new(AggregateFn::Avg, Expression::var("score")),
        ),
        Expression::constant(50),
    );
    assert_eq!(eval(&e, &row(&[("_agg0", int(72))])), Ok(NodeValue::boolean(true)));
    assert_eq!(
        eval(&e, &empty_row()),
        Err(EvalError::UnboundVariable("_agg0".to_string()))
    );
}
