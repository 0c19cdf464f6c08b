//! Row access
//!
//! Evaluation reads variables through [`RowAccess`] so the surrounding engine
//! can hand in whatever row representation it uses. [`BindingRow`] is a
//! simple owned implementation used by tests, constant folding and callers
//! without a row store of their own.

use crate::var::Var;
use sparql_value::Term;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a row, independent of its contents
///
/// Two rows binding the same values have different ids. Per-row caches
/// (BNODE relabelling) key on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Allocate a process-unique id
    pub fn fresh() -> Self {
        RowId(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Read-only view of one solution row
pub trait RowAccess {
    /// Term bound to `var`, if any
    fn get(&self, var: &Var) -> Option<&Term>;

    /// Identity used for per-row caches
    fn row_id(&self) -> RowId;

    fn contains(&self, var: &Var) -> bool {
        self.get(var).is_some()
    }
}

/// An immutable row of variable bindings
#[derive(Debug)]
pub struct BindingRow {
    id: RowId,
    bindings: BTreeMap<Var, Term>,
}

impl BindingRow {
    /// Empty row
    pub fn new() -> Self {
        Self {
            id: RowId::fresh(),
            bindings: BTreeMap::new(),
        }
    }

    /// Builder: add a binding
    pub fn with(mut self, var: impl Into<Var>, term: Term) -> Self {
        self.bindings.insert(var.into(), term);
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn vars(&self) -> impl Iterator<Item = &Var> {
        self.bindings.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.bindings.iter()
    }
}

impl Default for BindingRow {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a distinct row and receives a fresh id
impl Clone for BindingRow {
    fn clone(&self) -> Self {
        Self {
            id: RowId::fresh(),
            bindings: self.bindings.clone(),
        }
    }
}

impl<V: Into<Var>> FromIterator<(V, Term)> for BindingRow {
    fn from_iter<I: IntoIterator<Item = (V, Term)>>(iter: I) -> Self {
        Self {
            id: RowId::fresh(),
            bindings: iter.into_iter().map(|(v, t)| (v.into(), t)).collect(),
        }
    }
}

impl RowAccess for BindingRow {
    fn get(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    fn row_id(&self) -> RowId {
        self.id
    }
}

impl fmt::Display for BindingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(row")?;
        for (var, term) in &self.bindings {
            write!(f, " ({} {})", var, term)?;
        }
        f.write_str(")")
    }
}
