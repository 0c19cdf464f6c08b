//! # SPARQL Expressions
//!
//! Scalar expressions for FILTER, BIND, projection and aggregate arguments:
//! - [`Expression`]: a closed tree of constants, variables, function nodes,
//!   EXISTS sub-plans and aggregate placeholders
//! - Evaluation against one row: [`Expression::evaluate`] and the FILTER
//!   forms [`Expression::is_satisfied`] / [`Expression::try_is_satisfied`]
//! - The SPARQL 1.1 builtin library, identified by [`Function`]
//! - A bottom-up [`Transform`] framework and the rewrites built on it:
//!   substitution, constant folding, variable replacement and
//!   aggregate-to-variable rewriting
//!
//! Values, comparison and the error taxonomy live in `sparql-value` and are
//! re-exported here.
//!
//! ## Quick Start
//!
//! ```
//! use sparql_expr::{BindingRow, EvalContext, Expression, NodeValue, Term};
//!
//! let expr = Expression::add(Expression::var("x"), Expression::constant(1));
//! assert_eq!(expr.to_string(), "(+ ?x 1)");
//!
//! let row = BindingRow::new().with(
//!     "x",
//!     Term::typed("41", "http://www.w3.org/2001/XMLSchema#integer"),
//! );
//! let value = expr.evaluate(&row, &EvalContext::new()).unwrap();
//! assert_eq!(value, NodeValue::integer(42));
//! ```
//!
//! ## Special forms
//!
//! `&&`, `||`, `IF`, `COALESCE`, `BOUND`, `IN`, `NOT IN`, `EXISTS` and the
//! extension calls receive their arguments unevaluated. Every other function
//! evaluates its arguments left to right and propagates the first error.

pub mod aggregate;
pub mod binding;
pub mod context;
mod eval;
pub mod expr;
pub mod function;
pub mod options;
pub mod plan;
pub mod registry;
mod rewrite;
pub mod transform;
pub mod var;

// Re-exports
pub use aggregate::{AggregateFn, AggregatePlaceholder, Aggregator};
pub use binding::{BindingRow, RowAccess, RowId};
pub use context::EvalContext;
pub use expr::Expression;
pub use function::{CustomFunction, Function};
pub use options::EvalOptions;
pub use plan::{AlgebraPlan, ExistsOp, PlanTransform, SubPlanExecutor};
pub use registry::{Callable, FunctionRegistry, ResolverCache, SimpleRegistry};
pub use transform::Transform;
pub use var::Var;

pub use sparql_value::{
    CompareOptions, ComparisonKind, DateTimeOrder, EvalError, NodeValue, Result, Term,
};
