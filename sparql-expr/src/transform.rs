//! Bottom-up tree transforms
//!
//! A [`Transform`] holds one optional rewrite per node kind; a missing
//! rewrite is the identity. [`Expression::transform`] rewrites children
//! first, rebuilds a function node only when a child changed, and then
//! offers the node (with its new children) to the matching rewrite.
//!
//! The result is a `Cow`: `Cow::Borrowed` means nothing in the subtree
//! changed and the original node is handed back untouched.

use crate::aggregate::AggregatePlaceholder;
use crate::expr::Expression;
use crate::plan::{ExistsOp, PlanTransform};
use crate::var::Var;
use sparql_value::NodeValue;
use std::borrow::Cow;
use std::fmt;

type Rewrite<'a, T> = Box<dyn Fn(&T) -> Option<Expression> + 'a>;

/// Per-node-kind rewrites; `None` from a rewrite keeps the node
#[derive(Default)]
pub struct Transform<'a> {
    on_var: Option<Rewrite<'a, Var>>,
    on_const: Option<Rewrite<'a, NodeValue>>,
    on_function: Option<Rewrite<'a, Expression>>,
    on_exists: Option<Rewrite<'a, ExistsOp>>,
    on_aggregate: Option<Rewrite<'a, AggregatePlaceholder>>,
    plans: Option<&'a dyn PlanTransform>,
}

impl<'a> Transform<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_var(mut self, f: impl Fn(&Var) -> Option<Expression> + 'a) -> Self {
        self.on_var = Some(Box::new(f));
        self
    }

    pub fn on_const(mut self, f: impl Fn(&NodeValue) -> Option<Expression> + 'a) -> Self {
        self.on_const = Some(Box::new(f));
        self
    }

    /// Rewrite for function nodes, called after their children were transformed
    pub fn on_function(mut self, f: impl Fn(&Expression) -> Option<Expression> + 'a) -> Self {
        self.on_function = Some(Box::new(f));
        self
    }

    /// Rewrite for EXISTS nodes, called after the plan transform (if any)
    pub fn on_exists(mut self, f: impl Fn(&ExistsOp) -> Option<Expression> + 'a) -> Self {
        self.on_exists = Some(Box::new(f));
        self
    }

    pub fn on_aggregate(
        mut self,
        f: impl Fn(&AggregatePlaceholder) -> Option<Expression> + 'a,
    ) -> Self {
        self.on_aggregate = Some(Box::new(f));
        self
    }

    /// Algebra-level rewrite applied to every embedded plan
    pub fn with_plan_transform(mut self, plans: &'a dyn PlanTransform) -> Self {
        self.plans = Some(plans);
        self
    }
}

impl fmt::Debug for Transform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("on_var", &self.on_var.is_some())
            .field("on_const", &self.on_const.is_some())
            .field("on_function", &self.on_function.is_some())
            .field("on_exists", &self.on_exists.is_some())
            .field("on_aggregate", &self.on_aggregate.is_some())
            .field("plans", &self.plans.is_some())
            .finish()
    }
}

fn apply_leaf<'s, T>(
    node: &'s Expression,
    rewrite: &Option<Rewrite<'_, T>>,
    value: &T,
) -> Cow<'s, Expression> {
    match rewrite.as_ref().and_then(|f| f(value)) {
        Some(replacement) => Cow::Owned(replacement),
        None => Cow::Borrowed(node),
    }
}

impl Expression {
    /// Apply `transform` bottom-up
    pub fn transform<'s>(&'s self, transform: &Transform<'_>) -> Cow<'s, Expression> {
        match self {
            Expression::Const(value) => apply_leaf(self, &transform.on_const, value),
            Expression::Var(var) => apply_leaf(self, &transform.on_var, var),
            Expression::Aggregate(agg) => apply_leaf(self, &transform.on_aggregate, agg),
            Expression::Exists(op) => {
                let rewritten = transform
                    .plans
                    .and_then(|plans| plans.transform_plan(&op.plan))
                    .map(|plan| op.with_plan(plan));
                let current = rewritten.as_ref().unwrap_or(op);
                if let Some(replacement) = transform.on_exists.as_ref().and_then(|f| f(current)) {
                    return Cow::Owned(replacement);
                }
                match rewritten {
                    Some(op) => Cow::Owned(Expression::Exists(op)),
                    None => Cow::Borrowed(self),
                }
            }
            _ => {
                let args = self.args();
                let mut changed: Option<Vec<Expression>> = None;
                for (i, arg) in args.iter().enumerate() {
                    match arg.transform(transform) {
                        Cow::Owned(new_arg) => changed
                            .get_or_insert_with(|| args[..i].to_vec())
                            .push(new_arg),
                        Cow::Borrowed(_) => {
                            if let Some(new_args) = changed.as_mut() {
                                new_args.push(arg.clone());
                            }
                        }
                    }
                }
                let node = match changed {
                    Some(new_args) => Cow::Owned(self.with_args(new_args)),
                    None => Cow::Borrowed(self),
                };
                match transform.on_function.as_ref().and_then(|f| f(&node)) {
                    Some(replacement) => Cow::Owned(replacement),
                    None => node,
                }
            }
        }
    }

    /// Visit every node, children before parents
    ///
    /// Embedded plans and aggregate arguments are not descended into.
    pub fn walk(&self, visitor: &mut impl FnMut(&Expression)) {
        for arg in self.args() {
            arg.walk(visitor);
        }
        visitor(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;

    fn sample() -> Expression {
        Expression::and(
            Expression::gt(Expression::var("x"), Expression::constant(1)),
            Expression::bound("y"),
        )
    }

    #[test]
    fn test_identity_transform_borrows() {
        let e = sample();
        let out = e.transform(&Transform::new());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_unchanged_subtree_is_not_rebuilt() {
        let e = sample();
        let t = Transform::new().on_var(|v| (v.name() == "x").then(|| Expression::var("z")));
        let out = e.transform(&t);
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(
            out.as_ref(),
            &Expression::and(
                Expression::gt(Expression::var("z"), Expression::constant(1)),
                Expression::bound("y"),
            )
        );

        // The right-hand side did not change; only the left side is rebuilt.
        let t = Transform::new().on_var(|v| (v.name() == "nope").then(|| Expression::var("z")));
        assert!(matches!(e.transform(&t), Cow::Borrowed(_)));
    }

    #[test]
    fn test_function_rewrite_sees_new_children() {
        let e = Expression::add(Expression::var("x"), Expression::constant(1));
        let t = Transform::new()
            .on_var(|_| Some(Expression::constant(2)))
            .on_function(|node| {
                let all_const = node.args().iter().all(Expression::is_constant);
                (node.function() == Some(&Function::Add) && all_const)
                    .then(|| Expression::constant("folded"))
            });
        assert_eq!(e.transform(&t).into_owned(), Expression::constant("folded"));
    }

    #[test]
    fn test_walk_is_post_order() {
        let e = Expression::add(Expression::var("x"), Expression::constant(1));
        let mut seen = Vec::new();
        e.walk(&mut |node: &Expression| seen.push(node.to_string()));
        assert_eq!(seen, vec!["?x", "1", "(+ ?x 1)"]);
    }
}
