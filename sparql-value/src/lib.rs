//! # SPARQL Value
//!
//! Runtime values for SPARQL expression evaluation.
//!
//! This crate provides:
//! - [`Term`]: the RDF term type exchanged with the surrounding engine
//! - [`NodeValue`]: a term classified into an XSD value space
//! - Value comparison: [`same_as`], [`compare`] and the sort-only [`compare_always`]
//! - Numeric promotion and arithmetic
//! - [`EvalError`], the error type shared by every evaluation step
//!
//! ## Terms vs values
//!
//! `Term` equality is syntactic (`"1"^^xsd:integer` differs from
//! `"01"^^xsd:integer`). `NodeValue` equality is also syntactic so values
//! can key hash maps and deduplicate expression trees. Value equality, the
//! one SPARQL `=` uses, is [`same_as`].

pub mod arithmetic;
pub mod duration;
pub mod error;
pub mod numeric;
pub mod options;
pub mod temporal;
pub mod term;
pub mod value;
pub mod value_space;
pub mod vocab;

pub use arithmetic::{negate, numeric_cmp, plus, ArithmeticOp, NumericType};
pub use duration::{Duration, DurationKind};
pub use error::{ComparisonKind, EvalError, Result};
pub use options::{CompareOptions, DateTimeOrder};
pub use temporal::{Date, DateTime, Gregorian, GregorianKind, Temporal, Time};
pub use term::{Literal, Term};
pub use value::{NodeValue, ValueKind};
pub use value_space::{compare, compare_always, same_as, SpaceRelation, ValueSpace};
