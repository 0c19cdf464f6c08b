//! Expression tree
//!
//! An [`Expression`] is an immutable tree that is built once per query and
//! then evaluated against many rows. Function nodes are split by arity so
//! the common unary and binary shapes need no `Vec` allocation.
//!
//! Structural equality and hashing are syntactic: two trees are equal when
//! they have the same function identities, the same arities and pairwise
//! equal children. Constants compare by term, not by value, so `1` and
//! `1.0` are different constants.

use crate::aggregate::{AggregatePlaceholder, Aggregator};
use crate::function::Function;
use crate::plan::{AlgebraPlan, ExistsOp};
use crate::var::Var;
use sparql_value::{NodeValue, Term, ValueKind};
use std::fmt;
use std::sync::Arc;

/// Expression tree node
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Constant value
    Const(NodeValue),
    /// Variable reference
    Var(Var),
    /// Function with no arguments
    Func0 { func: Function },
    /// Function with one argument
    Func1 { func: Function, arg: Box<Expression> },
    /// Function with two arguments
    Func2 {
        func: Function,
        args: Box<[Expression; 2]>,
    },
    /// Function with three arguments
    Func3 {
        func: Function,
        args: Box<[Expression; 3]>,
    },
    /// Variadic function
    FuncN { func: Function, args: Vec<Expression> },
    /// EXISTS / NOT EXISTS over an embedded plan
    Exists(ExistsOp),
    /// Reference to an aggregate computed by the grouping stage
    Aggregate(AggregatePlaceholder),
}

impl Expression {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Function node with the variant matching the argument count
    ///
    /// Variadic functions are always `FuncN` so their shape does not
    /// depend on how many arguments a particular call has.
    pub fn call(func: Function, args: Vec<Expression>) -> Self {
        if func.is_variadic() {
            return Expression::FuncN { func, args };
        }
        match args.len() {
            0 => Expression::Func0 { func },
            1 | 2 | 3 => {
                let mut it = args.into_iter();
                match (it.next(), it.next(), it.next()) {
                    (Some(a), None, None) => Expression::Func1 {
                        func,
                        arg: Box::new(a),
                    },
                    (Some(a), Some(b), None) => Expression::Func2 {
                        func,
                        args: Box::new([a, b]),
                    },
                    (Some(a), Some(b), Some(c)) => Expression::Func3 {
                        func,
                        args: Box::new([a, b, c]),
                    },
                    _ => Expression::Func0 { func },
                }
            }
            _ => Expression::FuncN { func, args },
        }
    }

    /// The same node over new arguments
    ///
    /// Leaves (constants, variables, aggregates) and EXISTS nodes have no
    /// expression children and are returned unchanged.
    pub fn with_args(&self, args: Vec<Expression>) -> Self {
        match self {
            Expression::FuncN { func, .. } => Expression::FuncN {
                func: func.clone(),
                args,
            },
            Expression::Func0 { func }
            | Expression::Func1 { func, .. }
            | Expression::Func2 { func, .. }
            | Expression::Func3 { func, .. } => Expression::call(func.clone(), args),
            _ => self.clone(),
        }
    }

    /// Variable reference
    pub fn var(name: impl Into<Var>) -> Self {
        Expression::Var(name.into())
    }

    /// Constant
    pub fn constant(value: impl Into<NodeValue>) -> Self {
        Expression::Const(value.into())
    }

    /// Constant holding a term
    pub fn term(term: Term) -> Self {
        Expression::Const(NodeValue::from_term(term))
    }

    /// Constant IRI
    pub fn iri(iri: impl Into<Arc<str>>) -> Self {
        Expression::Const(NodeValue::iri(iri))
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::call(Function::Eq, vec![left, right])
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::call(Function::Ne, vec![left, right])
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::call(Function::Lt, vec![left, right])
    }

    pub fn le(left: Expression, right: Expression) -> Self {
        Self::call(Function::Le, vec![left, right])
    }

    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::call(Function::Gt, vec![left, right])
    }

    pub fn ge(left: Expression, right: Expression) -> Self {
        Self::call(Function::Ge, vec![left, right])
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Self::call(Function::Add, vec![left, right])
    }

    pub fn sub(left: Expression, right: Expression) -> Self {
        Self::call(Function::Sub, vec![left, right])
    }

    pub fn mul(left: Expression, right: Expression) -> Self {
        Self::call(Function::Mul, vec![left, right])
    }

    pub fn div(left: Expression, right: Expression) -> Self {
        Self::call(Function::Div, vec![left, right])
    }

    pub fn negate(expr: Expression) -> Self {
        Self::call(Function::Negate, vec![expr])
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::call(Function::And, vec![left, right])
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::call(Function::Or, vec![left, right])
    }

    pub fn not(expr: Expression) -> Self {
        Self::call(Function::Not, vec![expr])
    }

    pub fn if_then_else(cond: Expression, then: Expression, otherwise: Expression) -> Self {
        Self::call(Function::If, vec![cond, then, otherwise])
    }

    pub fn coalesce(args: Vec<Expression>) -> Self {
        Self::call(Function::Coalesce, args)
    }

    pub fn bound(var: impl Into<Var>) -> Self {
        Self::call(Function::Bound, vec![Expression::var(var)])
    }

    /// `expr IN (list...)`
    pub fn in_list(expr: Expression, list: Vec<Expression>) -> Self {
        let mut args = Vec::with_capacity(list.len() + 1);
        args.push(expr);
        args.extend(list);
        Self::call(Function::In, args)
    }

    /// `expr NOT IN (list...)`
    pub fn not_in(expr: Expression, list: Vec<Expression>) -> Self {
        let mut args = Vec::with_capacity(list.len() + 1);
        args.push(expr);
        args.extend(list);
        Self::call(Function::NotIn, args)
    }

    /// `CALL(<iri>, args...)`
    pub fn call_iri(iri: impl Into<Arc<str>>, args: Vec<Expression>) -> Self {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(Expression::iri(iri));
        all.extend(args);
        Self::call(Function::call(), all)
    }

    /// Custom function bound to `iri`
    pub fn custom(iri: impl Into<Arc<str>>, args: Vec<Expression>) -> Self {
        Self::call(Function::custom(iri), args)
    }

    pub fn exists(plan: Arc<dyn AlgebraPlan>) -> Self {
        Expression::Exists(ExistsOp::new(plan, false))
    }

    pub fn not_exists(plan: Arc<dyn AlgebraPlan>) -> Self {
        Expression::Exists(ExistsOp::new(plan, true))
    }

    /// Aggregate placeholder bound to `var` by the grouping stage
    pub fn aggregate(var: impl Into<Var>, aggregator: Aggregator) -> Self {
        Expression::Aggregate(AggregatePlaceholder::new(var, aggregator))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Function identity of a function node
    pub fn function(&self) -> Option<&Function> {
        match self {
            Expression::Func0 { func }
            | Expression::Func1 { func, .. }
            | Expression::Func2 { func, .. }
            | Expression::Func3 { func, .. }
            | Expression::FuncN { func, .. } => Some(func),
            _ => None,
        }
    }

    /// Expression children; empty for leaves and EXISTS
    pub fn args(&self) -> &[Expression] {
        match self {
            Expression::Func1 { arg, .. } => std::slice::from_ref(arg.as_ref()),
            Expression::Func2 { args, .. } => &args[..],
            Expression::Func3 { args, .. } => &args[..],
            Expression::FuncN { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expression::Const(_))
    }

    pub fn as_const(&self) -> Option<&NodeValue> {
        match self {
            Expression::Const(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Expression::Var(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Var> for Expression {
    fn from(var: Var) -> Self {
        Expression::Var(var)
    }
}

impl From<NodeValue> for Expression {
    fn from(value: NodeValue) -> Self {
        Expression::Const(value)
    }
}

/// Short constant form: bare numbers and booleans, quoted simple strings
fn fmt_const(value: &NodeValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let simple_string = value
        .as_term()
        .as_literal()
        .is_some_and(|lit| lit.datatype().is_none() && lit.lang().is_none());
    match value.kind() {
        ValueKind::Integer(_) | ValueKind::Decimal(_) | ValueKind::Double(_) | ValueKind::Boolean(_)
            if value.datatype_iri().is_some_and(is_short_datatype) =>
        {
            f.write_str(value.lexical_form())
        }
        ValueKind::String(s) if simple_string => write!(f, "{:?}", s),
        _ => write!(f, "{}", value),
    }
}

fn is_short_datatype(dt: &str) -> bool {
    use sparql_value::vocab::xsd;
    matches!(dt, xsd::INTEGER | xsd::DECIMAL | xsd::DOUBLE | xsd::BOOLEAN)
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Const(value) => fmt_const(value, f),
            Expression::Var(var) => write!(f, "{}", var),
            Expression::Exists(op) => write!(f, "{}", op),
            Expression::Aggregate(agg) => write!(f, "{}", agg.aggregator),
            _ => {
                let func = self.function().map(ToString::to_string).unwrap_or_default();
                write!(f, "({}", func)?;
                for arg in self.args() {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
