//! Rewrites built on [`Transform`]
//!
//! - `substitute()` - inline a row's bindings (variable inlining, EXISTS correlation)
//! - `fold_constants()` - pre-evaluate closed subtrees
//! - `replace_var()` / `substitute_exprs()` - variable-for-expression replacement
//! - `replace_aggregates()` - placeholders become plain variables after grouping
//! - `variables()` / `free_variables()` - variable collection

use crate::binding::{BindingRow, RowAccess};
use crate::context::EvalContext;
use crate::expr::Expression;
use crate::plan::{AlgebraPlan, PlanTransform};
use crate::transform::Transform;
use crate::var::Var;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Pushes a row's bindings into embedded plans
struct SubstitutePlans<'r> {
    row: &'r dyn RowAccess,
}

impl PlanTransform for SubstitutePlans<'_> {
    fn transform_plan(&self, plan: &Arc<dyn AlgebraPlan>) -> Option<Arc<dyn AlgebraPlan>> {
        plan.substitute(self.row)
    }
}

impl Expression {
    /// Replace every variable bound in `row` with its term.
    ///
    /// Unbound variables stay in place, so `BOUND(?x)` over a substituted
    /// tree still answers as it would have over the row. Aggregate
    /// placeholders whose variable is bound become constants.
    pub fn substitute(&self, row: &dyn RowAccess) -> Expression {
        let span = tracing::debug_span!("substitute", row = row.row_id().as_u64());
        let _guard = span.enter();

        let plans = SubstitutePlans { row };
        let transform = Transform::new()
            .on_var(|var| row.get(var).map(|term| Expression::term(term.clone())))
            .on_aggregate(|agg| row.get(&agg.var).map(|term| Expression::term(term.clone())))
            .with_plan_transform(&plans);
        self.transform(&transform).into_owned()
    }

    /// Fold closed subtrees into constants without an evaluation context.
    ///
    /// Functions whose result depends on the evaluation options (`IRI()`,
    /// comparisons) are left in place; use [`Expression::fold_constants_with`]
    /// to fold them under the options the tree will be evaluated with.
    pub fn fold_constants(&self) -> Expression {
        self.fold(&EvalContext::new(), false)
    }

    /// Fold closed subtrees into constants.
    ///
    /// A function node is folded when every argument is already a constant,
    /// the function is deterministic and it is not a special form. A node
    /// whose evaluation fails is kept as-is so the error surfaces per row.
    /// The result is only valid for evaluation under `ctx`'s options.
    pub fn fold_constants_with(&self, ctx: &EvalContext<'_>) -> Expression {
        self.fold(ctx, true)
    }

    fn fold(&self, ctx: &EvalContext<'_>, with_options: bool) -> Expression {
        let span = tracing::debug_span!("fold_constants", with_options);
        let _guard = span.enter();

        let empty = BindingRow::new();
        let transform = Transform::new().on_function(|node| {
            let func = node.function()?;
            if func.is_special_form() || !func.is_deterministic() {
                return None;
            }
            if !with_options && func.is_context_dependent() {
                return None;
            }
            if !node.args().iter().all(Expression::is_constant) {
                return None;
            }
            match func.eval(node.args(), &empty, ctx) {
                Ok(value) => {
                    tracing::trace!(expr = %node, value = %value, "folded");
                    Some(Expression::Const(value))
                }
                Err(e) => {
                    tracing::trace!(expr = %node, error = %e, "fold skipped");
                    None
                }
            }
        });
        self.transform(&transform).into_owned()
    }

    /// Replace every reference to `var` with `replacement`
    pub fn replace_var(&self, var: &Var, replacement: &Expression) -> Expression {
        let transform = Transform::new().on_var(|v| (v == var).then(|| replacement.clone()));
        self.transform(&transform).into_owned()
    }

    /// Replace variables by expressions, all at once.
    ///
    /// Replacements are not rewritten again, so `{?x -> ?y, ?y -> ?x}` swaps.
    pub fn substitute_exprs(&self, replacements: &HashMap<Var, Expression>) -> Expression {
        if replacements.is_empty() {
            return self.clone();
        }
        let transform = Transform::new().on_var(|v| replacements.get(v).cloned());
        self.transform(&transform).into_owned()
    }

    /// Replace aggregate placeholders with references to their result variables
    pub fn replace_aggregates(&self) -> Expression {
        let transform =
            Transform::new().on_aggregate(|agg| Some(Expression::Var(agg.var.clone())));
        self.transform(&transform).into_owned()
    }

    /// Every variable mentioned, including inside embedded plans
    pub fn variables(&self) -> BTreeSet<Var> {
        let mut vars = BTreeSet::new();
        self.walk(&mut |node: &Expression| match node {
            Expression::Var(v) => {
                vars.insert(v.clone());
            }
            Expression::Aggregate(agg) => {
                vars.insert(agg.var.clone());
            }
            Expression::Exists(op) => vars.extend(op.plan.mentioned_vars()),
            _ => {}
        });
        vars
    }

    /// Variables whose value must come from the enclosing row.
    ///
    /// Variables that are bound only inside an embedded plan are excluded.
    pub fn free_variables(&self) -> BTreeSet<Var> {
        let mut vars = BTreeSet::new();
        self.walk(&mut |node: &Expression| match node {
            Expression::Var(v) => {
                vars.insert(v.clone());
            }
            Expression::Aggregate(agg) => {
                vars.insert(agg.var.clone());
            }
            Expression::Exists(op) => vars.extend(op.free_vars()),
            _ => {}
        });
        vars
    }

    pub fn contains_aggregate(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node: &Expression| {
            found |= matches!(node, Expression::Aggregate(_));
        });
        found
    }
}
