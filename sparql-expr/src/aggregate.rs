//! Aggregator specifications
//!
//! Aggregates are computed by the grouping stage of the surrounding engine
//! and bound into each group row under an allocated variable. Inside an
//! expression an aggregate is only a placeholder: evaluation reads that
//! variable and never recomputes the aggregate.

use crate::expr::Expression;
use crate::var::Var;
use std::fmt;

/// Aggregate function
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregateFn {
    /// COUNT(expr) - count bound values
    Count,
    /// COUNT(*) - count rows
    CountAll,
    /// SUM - numeric sum
    Sum,
    /// AVG - numeric average
    Avg,
    /// MIN - minimum by sort order
    Min,
    /// MAX - maximum by sort order
    Max,
    /// SAMPLE - an arbitrary value
    Sample,
    /// GROUP_CONCAT - concatenate strings with a separator
    GroupConcat { separator: String },
}

impl AggregateFn {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFn::Count | AggregateFn::CountAll => "count",
            AggregateFn::Sum => "sum",
            AggregateFn::Avg => "avg",
            AggregateFn::Min => "min",
            AggregateFn::Max => "max",
            AggregateFn::Sample => "sample",
            AggregateFn::GroupConcat { .. } => "group_concat",
        }
    }
}

/// An aggregate call as written in the query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Aggregator {
    pub function: AggregateFn,
    /// Whether DISTINCT was specified (e.g., SUM(DISTINCT ?x))
    pub distinct: bool,
    /// Argument; `None` only for COUNT(*)
    pub expr: Option<Box<Expression>>,
}

impl Aggregator {
    pub fn new(function: AggregateFn, expr: Expression) -> Self {
        Self {
            function,
            distinct: false,
            expr: Some(Box::new(expr)),
        }
    }

    pub fn count_all() -> Self {
        Self {
            function: AggregateFn::CountAll,
            distinct: false,
            expr: None,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.function.name())?;
        if self.distinct {
            f.write_str(" distinct")?;
        }
        if let AggregateFn::GroupConcat { separator } = &self.function {
            write!(f, " (separator {:?})", separator)?;
        }
        match &self.expr {
            Some(expr) => write!(f, " {})", expr),
            None => f.write_str(" *)"),
        }
    }
}

/// Aggregate reference inside an expression
///
/// `var` is the internal variable the grouping stage binds the result to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregatePlaceholder {
    pub var: Var,
    pub aggregator: Aggregator,
}

impl AggregatePlaceholder {
    pub fn new(var: impl Into<Var>, aggregator: Aggregator) -> Self {
        Self {
            var: var.into(),
            aggregator,
        }
    }
}
