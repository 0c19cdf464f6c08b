//! Value-space classification and value comparison
//!
//! SPARQL `=` and `<` operate on *values*, not terms. Each operand is
//! classified into a [`ValueSpace`]; the pair of classes (not either class
//! alone) decides how the operands are compared:
//!
//! - same class: compare inside that value space
//! - at least one `Unknown`: indeterminate, fall back to term-level signals
//! - two different known classes: incompatible
//!
//! Entry points:
//!
//! - [`same_as`]: value equality (`=`, `!=`, `IN`)
//! - [`compare`]: strict order for `<`, `<=`, `>`, `>=`
//! - [`compare_always`]: a total order for ORDER BY only, ranking spaces
//!   before values. Never use it for relational operators.

use crate::arithmetic::numeric_cmp;
use crate::error::{ComparisonKind, EvalError, Result};
use crate::options::{CompareOptions, DateTimeOrder};
use crate::temporal::temporal_cmp;
use crate::term::Term;
use crate::value::{NodeValue, ValueKind};
use std::cmp::Ordering;

/// Value space of a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSpace {
    Numeric,
    Boolean,
    String,
    DateTime,
    Date,
    Time,
    Duration,
    GYear,
    GYearMonth,
    GMonth,
    GMonthDay,
    GDay,
    LangString,
    /// IRIs and blank nodes
    OpaqueTerm,
    /// Literals with no recognized value space under the active options
    Unknown,
}

impl ValueSpace {
    /// Classify a value.
    ///
    /// Numeric, dateTime, string and boolean literals plus non-literal terms
    /// are always recognized; the remaining spaces only when
    /// `value_extensions` is enabled.
    pub fn of(value: &NodeValue, options: &CompareOptions) -> Self {
        match value.kind() {
            ValueKind::Integer(_) | ValueKind::Decimal(_) | ValueKind::Float(_) | ValueKind::Double(_) => {
                return ValueSpace::Numeric
            }
            ValueKind::DateTime(_) => return ValueSpace::DateTime,
            ValueKind::String(_) => return ValueSpace::String,
            ValueKind::Boolean(_) => return ValueSpace::Boolean,
            ValueKind::Node(term) if !term.is_literal() => return ValueSpace::OpaqueTerm,
            _ => {}
        }
        if !options.value_extensions {
            return ValueSpace::Unknown;
        }
        match value.kind() {
            ValueKind::Date(_) => ValueSpace::Date,
            ValueKind::Time(_) => ValueSpace::Time,
            ValueKind::Duration(_) => ValueSpace::Duration,
            ValueKind::Gregorian(g) => match g.kind() {
                crate::temporal::GregorianKind::Year => ValueSpace::GYear,
                crate::temporal::GregorianKind::YearMonth => ValueSpace::GYearMonth,
                crate::temporal::GregorianKind::Month => ValueSpace::GMonth,
                crate::temporal::GregorianKind::MonthDay => ValueSpace::GMonthDay,
                crate::temporal::GregorianKind::Day => ValueSpace::GDay,
            },
            ValueKind::LangString { .. } => ValueSpace::LangString,
            _ => ValueSpace::Unknown,
        }
    }

    /// Position of the space in the ORDER BY sequence: IRIs and blank nodes
    /// first, then literals grouped by space, unrecognized literals last
    pub fn sort_rank(self) -> u8 {
        match self {
            ValueSpace::OpaqueTerm => 0,
            ValueSpace::Numeric => 1,
            ValueSpace::Boolean => 2,
            ValueSpace::DateTime => 3,
            ValueSpace::Date => 4,
            ValueSpace::Time => 5,
            ValueSpace::GYear => 6,
            ValueSpace::GYearMonth => 7,
            ValueSpace::GMonth => 8,
            ValueSpace::GMonthDay => 9,
            ValueSpace::GDay => 10,
            ValueSpace::Duration => 11,
            ValueSpace::String => 12,
            ValueSpace::LangString => 13,
            ValueSpace::Unknown => 14,
        }
    }
}

/// How the classes of two operands relate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceRelation {
    SameClass(ValueSpace),
    /// Two different recognized classes
    Incompatible,
    /// At least one side is `Unknown`
    Indeterminate,
}

impl SpaceRelation {
    pub fn combine(left: ValueSpace, right: ValueSpace) -> Self {
        if left == right && left != ValueSpace::Unknown {
            SpaceRelation::SameClass(left)
        } else if left == ValueSpace::Unknown || right == ValueSpace::Unknown {
            SpaceRelation::Indeterminate
        } else {
            SpaceRelation::Incompatible
        }
    }

    pub fn of(left: &NodeValue, right: &NodeValue, options: &CompareOptions) -> Self {
        Self::combine(ValueSpace::of(left, options), ValueSpace::of(right, options))
    }
}

/// SPARQL value equality.
///
/// Errors with `IndeterminateComparison` for temporal pairs that cannot be
/// decided and with `Incomparable` for literal pairs that have no defined
/// equality and no cheap proof of inequality.
pub fn same_as(left: &NodeValue, right: &NodeValue, options: &CompareOptions) -> Result<bool> {
    match SpaceRelation::of(left, right, options) {
        SpaceRelation::SameClass(space) => same_class_eq(space, left, right, options),
        SpaceRelation::Indeterminate if !options.value_extensions => Ok(raw_term_eq(left, right)),
        SpaceRelation::Indeterminate => {
            if !left.is_literal() || !right.is_literal() {
                return Ok(false);
            }
            if left.as_term() == right.as_term() {
                return Ok(true);
            }
            if left.lang().is_some() || right.lang().is_some() {
                return Ok(false);
            }
            Err(EvalError::incomparable(ComparisonKind::Equality, left, right))
        }
        SpaceRelation::Incompatible => {
            if !left.is_literal() || !right.is_literal() {
                return Ok(false);
            }
            if left.lang().is_some() != right.lang().is_some() {
                return Ok(false);
            }
            Err(EvalError::incomparable(ComparisonKind::Equality, left, right))
        }
    }
}

fn same_class_eq(
    space: ValueSpace,
    left: &NodeValue,
    right: &NodeValue,
    options: &CompareOptions,
) -> Result<bool> {
    match (space, left.kind(), right.kind()) {
        (ValueSpace::Numeric, _, _) => Ok(numeric_cmp(left, right) == Some(Ordering::Equal)),
        (ValueSpace::String, ValueKind::String(a), ValueKind::String(b)) => Ok(a == b),
        (ValueSpace::Boolean, ValueKind::Boolean(a), ValueKind::Boolean(b)) => Ok(a == b),
        (
            ValueSpace::LangString,
            ValueKind::LangString { lexical: la, lang: ta },
            ValueKind::LangString { lexical: lb, lang: tb },
        ) => Ok(la == lb && ta.eq_ignore_ascii_case(tb)),
        (ValueSpace::OpaqueTerm, _, _) => Ok(left.as_term() == right.as_term()),
        (ValueSpace::Duration, ValueKind::Duration(a), ValueKind::Duration(b)) => {
            let pure_year_month = |d: &crate::duration::Duration| d.nanos() == 0 && d.months() != 0;
            let pure_day_time = |d: &crate::duration::Duration| d.months() == 0 && d.nanos() != 0;
            if (pure_year_month(a) && pure_day_time(b)) || (pure_day_time(a) && pure_year_month(b)) {
                return Err(EvalError::indeterminate(left, right));
            }
            Ok(temporal_order(left, right, options)? == Ordering::Equal)
        }
        _ => Ok(temporal_order(left, right, options)? == Ordering::Equal),
    }
}

/// Order two values of the same temporal or duration space
fn temporal_order(left: &NodeValue, right: &NodeValue, options: &CompareOptions) -> Result<Ordering> {
    let order = options.datetime_order;
    let ordering = match (left.kind(), right.kind()) {
        (ValueKind::DateTime(a), ValueKind::DateTime(b)) => temporal_cmp(a, b, order),
        (ValueKind::Date(a), ValueKind::Date(b)) => temporal_cmp(a, b, order),
        (ValueKind::Time(a), ValueKind::Time(b)) => temporal_cmp(a, b, order),
        (ValueKind::Gregorian(a), ValueKind::Gregorian(b)) => temporal_cmp(a, b, order),
        (ValueKind::Duration(a), ValueKind::Duration(b)) => a.partial_cmp_xsd(b),
        _ => {
            return Err(EvalError::internal(format!(
                "temporal comparison of {} and {}",
                left.type_name(),
                right.type_name()
            )))
        }
    };
    ordering.ok_or_else(|| EvalError::indeterminate(left, right))
}

/// Term equality, ignoring the case of language tags
fn raw_term_eq(left: &NodeValue, right: &NodeValue) -> bool {
    match (left.as_term(), right.as_term()) {
        (Term::Literal(a), Term::Literal(b)) => match (a.lang(), b.lang()) {
            (Some(la), Some(lb)) => {
                a.lexical() == b.lexical() && a.datatype() == b.datatype() && la.eq_ignore_ascii_case(lb)
            }
            _ => a == b,
        },
        (a, b) => a == b,
    }
}

/// Value ordering for `<`, `<=`, `>`, `>=`.
///
/// `Ok(None)` means the pair is unordered (a NaN operand): every relational
/// operator is false but no error is raised.
pub fn compare(left: &NodeValue, right: &NodeValue, options: &CompareOptions) -> Result<Option<Ordering>> {
    let space = match SpaceRelation::of(left, right, options) {
        SpaceRelation::SameClass(space) => space,
        SpaceRelation::Incompatible | SpaceRelation::Indeterminate => {
            return opaque_order(left, right);
        }
    };
    match (space, left.kind(), right.kind()) {
        (ValueSpace::Numeric, _, _) => Ok(numeric_cmp(left, right)),
        (ValueSpace::String, ValueKind::String(a), ValueKind::String(b)) => Ok(Some(a.cmp(b))),
        (ValueSpace::Boolean, ValueKind::Boolean(a), ValueKind::Boolean(b)) => Ok(Some(a.cmp(b))),
        (
            ValueSpace::LangString,
            ValueKind::LangString { lexical: la, lang: ta },
            ValueKind::LangString { lexical: lb, lang: tb },
        ) => {
            if ta.eq_ignore_ascii_case(tb) {
                Ok(Some(la.cmp(lb)))
            } else {
                Err(EvalError::incomparable(ComparisonKind::Ordering, left, right))
            }
        }
        (ValueSpace::OpaqueTerm, _, _) => opaque_order(left, right),
        _ => temporal_order(left, right, options).map(Some),
    }
}

/// Total order for ORDER BY.
///
/// Orders by value space first, then by value inside the space, then by
/// the syntactic term order. Inside a space every pair gets an answer:
/// NaN sorts below every other number, timezone-less temporals are read as
/// UTC and durations compare on their approximate length.
pub fn compare_always(left: &NodeValue, right: &NodeValue, options: &CompareOptions) -> Ordering {
    let left_space = ValueSpace::of(left, options);
    let right_space = ValueSpace::of(right, options);
    left_space
        .sort_rank()
        .cmp(&right_space.sort_rank())
        .then_with(|| {
            if left_space == right_space {
                sort_value_order(left_space, left, right, options)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| left.as_term().cmp(right.as_term()))
}

/// Value order of two values of one space, total for sorting
fn sort_value_order(space: ValueSpace, left: &NodeValue, right: &NodeValue, options: &CompareOptions) -> Ordering {
    match (space, left.kind(), right.kind()) {
        (ValueSpace::Numeric, _, _) => {
            let is_nan = |v: &NodeValue| v.as_double().map_or(false, f64::is_nan);
            match (is_nan(left), is_nan(right)) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => numeric_cmp(left, right).unwrap_or(Ordering::Equal),
            }
        }
        (ValueSpace::String, ValueKind::String(a), ValueKind::String(b)) => {
            let datatype = |v: &NodeValue| v.as_term().as_literal().and_then(|l| l.datatype().map(str::to_owned));
            a.cmp(b).then_with(|| datatype(left).cmp(&datatype(right)))
        }
        (ValueSpace::Boolean, ValueKind::Boolean(a), ValueKind::Boolean(b)) => a.cmp(b),
        (
            ValueSpace::LangString,
            ValueKind::LangString { lexical: la, lang: ta },
            ValueKind::LangString { lexical: lb, lang: tb },
        ) => la
            .cmp(lb)
            .then_with(|| ta.to_ascii_lowercase().cmp(&tb.to_ascii_lowercase())),
        (ValueSpace::Duration, ValueKind::Duration(a), ValueKind::Duration(b)) => {
            a.sort_key().cmp(&b.sort_key())
        }
        (ValueSpace::OpaqueTerm | ValueSpace::Unknown, _, _) => Ordering::Equal,
        _ => {
            let utc = options.with_datetime_order(DateTimeOrder::ImplicitUtc);
            temporal_order(left, right, &utc).unwrap_or(Ordering::Equal)
        }
    }
}

/// Only identical terms are ordered (as equal)
fn opaque_order(left: &NodeValue, right: &NodeValue) -> Result<Option<Ordering>> {
    if left.as_term() == right.as_term() {
        Ok(Some(Ordering::Equal))
    } else {
        Err(EvalError::incomparable(ComparisonKind::Ordering, left, right))
    }
}
