//! Execution environment for expression evaluation
//!
//! An [`EvalContext`] is created per query (or per worker) and borrowed by
//! every evaluation. It carries:
//!
//! - [`EvalOptions`]
//! - the external collaborators: function registry and sub-plan executor
//! - the query time used by `NOW()`
//! - a generic key/value map for caller-supplied state
//! - the blank node relabelling table for `BNODE(str)`
//!
//! Only the table of the row being evaluated is kept. It is keyed by
//! [`RowId`] (row identity, never row contents) and replaced as soon as a
//! different row asks for a label, so memory stays flat over a stream of
//! rows. The table is interior-mutable, so a context is owned by one worker
//! thread at a time. Expression trees stay immutable and shareable.

use crate::binding::RowId;
use crate::options::EvalOptions;
use crate::plan::SubPlanExecutor;
use crate::registry::FunctionRegistry;
use chrono::{Offset, Utc};
use sparql_value::{CompareOptions, DateTime};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Execution environment passed to every evaluation
pub struct EvalContext<'a> {
    options: EvalOptions,
    registry: Option<&'a dyn FunctionRegistry>,
    executor: Option<&'a dyn SubPlanExecutor>,
    query_time: DateTime,
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
    bnode_labels: RefCell<Option<(RowId, HashMap<String, Arc<str>>)>>,
}

impl<'a> EvalContext<'a> {
    /// Context with default options, no collaborators, and `NOW()` fixed at creation
    pub fn new() -> Self {
        Self {
            options: EvalOptions::default(),
            registry: None,
            executor: None,
            query_time: DateTime::from_chrono(Utc::now().with_timezone(&Utc.fix())),
            values: HashMap::new(),
            bnode_labels: RefCell::new(None),
        }
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach the function registry used by CALL and custom functions
    pub fn with_registry(mut self, registry: &'a dyn FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Attach the executor used by EXISTS / NOT EXISTS
    pub fn with_executor(mut self, executor: &'a dyn SubPlanExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Fix the value returned by `NOW()`
    pub fn with_query_time(mut self, query_time: DateTime) -> Self {
        self.query_time = query_time;
        self
    }

    /// Store a caller-defined value in the context map
    pub fn with_value(mut self, key: impl Into<String>, value: Arc<dyn Any + Send + Sync>) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    pub fn compare_options(&self) -> &CompareOptions {
        &self.options.compare
    }

    pub fn registry(&self) -> Option<&'a dyn FunctionRegistry> {
        self.registry
    }

    pub fn executor(&self) -> Option<&'a dyn SubPlanExecutor> {
        self.executor
    }

    pub fn query_time(&self) -> &DateTime {
        &self.query_time
    }

    /// Typed lookup in the context map
    pub fn value<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Blank node label for `key` within one row.
    ///
    /// Stable while the same row keeps asking; the first request from another
    /// row discards the previous row's labels.
    pub fn bnode_label(&self, row: RowId, key: &str) -> Arc<str> {
        let mut current = self.bnode_labels.borrow_mut();
        if current.as_ref().map_or(false, |(id, _)| *id != row) {
            *current = None;
        }
        let (_, table) = current.get_or_insert_with(|| (row, HashMap::new()));
        if let Some(label) = table.get(key) {
            return label.clone();
        }
        let label = fresh_bnode_label();
        table.insert(key.to_string(), label.clone());
        label
    }

    /// Drop the relabelling table if it belongs to `row`
    pub fn release_row(&self, row: RowId) {
        let mut current = self.bnode_labels.borrow_mut();
        if current.as_ref().map_or(false, |(id, _)| *id == row) {
            *current = None;
        }
    }

    /// Number of rows holding relabelling state (zero or one)
    pub fn tracked_rows(&self) -> usize {
        usize::from(self.bnode_labels.borrow().is_some())
    }
}

impl Default for EvalContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("options", &self.options)
            .field("has_registry", &self.registry.is_some())
            .field("has_executor", &self.executor.is_some())
            .field("query_time", &self.query_time)
            .field("values", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A globally unique blank node label
pub(crate) fn fresh_bnode_label() -> Arc<str> {
    Arc::from(format!("b{}", uuid::Uuid::new_v4().simple()))
}
