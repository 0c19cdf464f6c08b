//! Embedded sub-plans for EXISTS / NOT EXISTS
//!
//! The algebra itself belongs to the surrounding engine. An expression only
//! holds a plan behind [`AlgebraPlan`] so it can:
//!
//! - report the plan's variables for `free_variables`
//! - substitute a row into the plan alongside the rest of the tree
//! - compare and hash the plan structurally
//!
//! Running the plan is delegated to a [`SubPlanExecutor`].

use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::var::Var;
use sparql_value::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An opaque algebra expression owned by the surrounding engine
pub trait AlgebraPlan: fmt::Debug + fmt::Display + Send + Sync {
    /// Every variable the plan mentions
    fn mentioned_vars(&self) -> BTreeSet<Var>;

    /// Variables bound only inside the plan (e.g. by an inner projection)
    /// and therefore not visible to the enclosing expression
    fn scoped_vars(&self) -> BTreeSet<Var>;

    /// The plan with bound variables replaced by the row's terms;
    /// `None` when nothing changed
    fn substitute(&self, row: &dyn RowAccess) -> Option<Arc<dyn AlgebraPlan>>;

    /// Structural equality
    fn plan_eq(&self, other: &dyn AlgebraPlan) -> bool;

    /// Structural hash consistent with [`plan_eq`](Self::plan_eq)
    fn plan_hash(&self, state: &mut dyn Hasher);
}

/// Algebra-level rewrite driven alongside an expression transform
pub trait PlanTransform {
    /// Rewrite `plan`; `None` when unchanged
    fn transform_plan(&self, plan: &Arc<dyn AlgebraPlan>) -> Option<Arc<dyn AlgebraPlan>>;
}

/// Runs embedded sub-plans
pub trait SubPlanExecutor: Send + Sync {
    /// Whether `plan`, seeded with `row` as its only input row, yields any solution
    fn exists(&self, plan: &dyn AlgebraPlan, row: &dyn RowAccess, ctx: &EvalContext<'_>) -> Result<bool>;
}

/// EXISTS or NOT EXISTS over an embedded plan
#[derive(Clone, Debug)]
pub struct ExistsOp {
    pub plan: Arc<dyn AlgebraPlan>,
    pub negated: bool,
    /// Original query text, kept for diagnostics only
    pub source: Option<Arc<str>>,
}

impl ExistsOp {
    pub fn new(plan: Arc<dyn AlgebraPlan>, negated: bool) -> Self {
        Self {
            plan,
            negated,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Same operator over a different plan
    pub fn with_plan(&self, plan: Arc<dyn AlgebraPlan>) -> Self {
        Self {
            plan,
            negated: self.negated,
            source: self.source.clone(),
        }
    }

    /// Variables visible to the enclosing expression
    pub fn free_vars(&self) -> BTreeSet<Var> {
        let scoped = self.plan.scoped_vars();
        self.plan
            .mentioned_vars()
            .into_iter()
            .filter(|v| !scoped.contains(v))
            .collect()
    }
}

impl PartialEq for ExistsOp {
    fn eq(&self, other: &Self) -> bool {
        self.negated == other.negated && self.plan.plan_eq(other.plan.as_ref())
    }
}

impl Eq for ExistsOp {}

impl Hash for ExistsOp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negated.hash(state);
        self.plan.plan_hash(state);
    }
}

impl fmt::Display for ExistsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.negated { "notexists" } else { "exists" };
        write!(f, "({} {})", op, self.plan)
    }
}
