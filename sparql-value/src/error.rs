//! Error types for expression evaluation
//!
//! Every failure that can occur while evaluating an expression against a row
//! is an [`EvalError`]. Only [`EvalError::InternalInvariant`] is fatal; all
//! other variants are ordinary SPARQL evaluation errors which a FILTER treats
//! as "not satisfied" and a BIND treats as "leave unbound".

use std::fmt;
use thiserror::Error;

/// Result type alias using [`EvalError`]
pub type Result<T> = std::result::Result<T, EvalError>;

/// Which comparison was being attempted when two values turned out incomparable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    /// `=`, `!=`, `IN`, `sameAs`
    Equality,
    /// `<`, `<=`, `>`, `>=`
    Ordering,
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonKind::Equality => f.write_str("equality"),
            ComparisonKind::Ordering => f.write_str("ordering"),
        }
    }
}

/// Expression evaluation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A variable reference with no entry in the row
    #[error("Unbound variable: ?{0}")]
    UnboundVariable(String),

    /// The operand's runtime class does not support the operation
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No equality or order is defined between the two operands
    #[error("Incomparable values for {kind}: {left} and {right}")]
    Incomparable {
        kind: ComparisonKind,
        left: String,
        right: String,
    },

    /// Date/time/duration pair with insufficient timezone information
    #[error("Indeterminate comparison: {left} and {right}")]
    IndeterminateComparison { left: String, right: String },

    /// A function IRI did not resolve to a callable
    #[error("Function not bound: <{0}>")]
    FunctionNotBound(String),

    /// Integer or decimal division by zero
    #[error("Division by zero")]
    DivideByZero,

    /// Bad arity, bad regex, unusable argument value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The external sub-plan executor failed (EXISTS / NOT EXISTS)
    #[error("Sub-plan execution failed: {0}")]
    SubPlan(String),

    /// An evaluation path that well-formed trees never reach
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl EvalError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl fmt::Display) -> Self {
        EvalError::TypeMismatch {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Create an incomparable-values error
    pub fn incomparable(kind: ComparisonKind, left: impl fmt::Display, right: impl fmt::Display) -> Self {
        EvalError::Incomparable {
            kind,
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Create an indeterminate comparison error
    pub fn indeterminate(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        EvalError::IndeterminateComparison {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        EvalError::InvalidArgument(msg.into())
    }

    /// Create an internal invariant error
    pub fn internal(msg: impl Into<String>) -> Self {
        EvalError::InternalInvariant(msg.into())
    }

    /// True only for programmer errors that must abort evaluation
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvalError::InternalInvariant(_))
    }

    /// True for the error BOUND converts into `false`
    pub fn is_unbound(&self) -> bool {
        matches!(self, EvalError::UnboundVariable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_internal_invariant_is_fatal() {
        assert!(EvalError::internal("boom").is_fatal());
        assert!(!EvalError::DivideByZero.is_fatal());
        assert!(!EvalError::UnboundVariable("x".into()).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = EvalError::incomparable(ComparisonKind::Ordering, "\"a\"", "1");
        assert_eq!(
            err.to_string(),
            "Incomparable values for ordering: \"a\" and 1"
        );
        assert_eq!(
            EvalError::UnboundVariable("x".into()).to_string(),
            "Unbound variable: ?x"
        );
    }
}
