//! Expression evaluation
//!
//! Evaluation runs one tree against one row and an [`EvalContext`].
//!
//! # Module Structure
//!
//! - `evaluate`: entry points on [`Expression`] (`evaluate`, `is_satisfied`)
//! - `dispatch`: routes a [`Function`] to its implementation
//! - `helpers`: arity checks, string argument access, regex caching
//! - Special forms: `logical`, `conditional`, `extension`, `exists`
//! - Builtins by category: `compare`, `arithmetic`, `string`, `numeric`,
//!   `datetime`, `types`, `rdf`, `uuid`, `hash`
//!
//! [`EvalContext`]: crate::context::EvalContext
//! [`Expression`]: crate::expr::Expression
//! [`Function`]: crate::function::Function

mod arithmetic;
mod compare;
mod conditional;
mod datetime;
mod dispatch;
mod evaluate;
mod exists;
mod extension;
mod hash;
mod helpers;
mod logical;
mod numeric;
mod rdf;
mod string;
mod types;
mod uuid;
