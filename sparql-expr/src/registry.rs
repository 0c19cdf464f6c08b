//! Function registry and resolution cache
//!
//! `CALL(<iri>, ...)` and custom function nodes resolve their IRI through an
//! external [`FunctionRegistry`]. Each node owns a [`ResolverCache`] so a
//! given IRI is looked up at most once per tree, including IRIs the registry
//! does not know (cached as `None`).

use crate::binding::RowAccess;
use crate::context::EvalContext;
use crate::expr::Expression;
use parking_lot::RwLock;
use sparql_value::{NodeValue, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A resolved extension function
///
/// Receives its arguments unevaluated and decides its own evaluation order.
pub type Callable =
    Arc<dyn Fn(&[Expression], &dyn RowAccess, &EvalContext<'_>) -> Result<NodeValue> + Send + Sync>;

/// Resolves function IRIs to callables
pub trait FunctionRegistry: Send + Sync {
    fn resolve(&self, iri: &str) -> Option<Callable>;
}

/// A `HashMap`-backed registry
#[derive(Clone, Default)]
pub struct SimpleRegistry {
    functions: HashMap<Arc<str>, Callable>,
}

impl SimpleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `iri`, replacing any previous entry
    pub fn register<F>(&mut self, iri: impl Into<Arc<str>>, f: F) -> &mut Self
    where
        F: Fn(&[Expression], &dyn RowAccess, &EvalContext<'_>) -> Result<NodeValue> + Send + Sync + 'static,
    {
        self.functions.insert(iri.into(), Arc::new(f));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, iri: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&[Expression], &dyn RowAccess, &EvalContext<'_>) -> Result<NodeValue> + Send + Sync + 'static,
    {
        self.register(iri, f);
        self
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FunctionRegistry for SimpleRegistry {
    fn resolve(&self, iri: &str) -> Option<Callable> {
        self.functions.get(iri).cloned()
    }
}

impl fmt::Debug for SimpleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}

/// Per-node cache of IRI resolutions, shared by clones of the node
///
/// Entries are written once per IRI; a `None` entry records a failed lookup.
#[derive(Clone, Default)]
pub struct ResolverCache(Arc<RwLock<HashMap<Arc<str>, Option<Callable>>>>);

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `iri`, consulting the registry only on the first request
    pub fn resolve(&self, iri: &str, registry: &dyn FunctionRegistry) -> Option<Callable> {
        if let Some(entry) = self.0.read().get(iri) {
            return entry.clone();
        }
        let mut cache = self.0.write();
        if let Some(entry) = cache.get(iri) {
            return entry.clone();
        }
        let resolved = registry.resolve(iri);
        if resolved.is_none() {
            tracing::debug!(iri, "function IRI not bound in registry");
        }
        cache.insert(Arc::from(iri), resolved.clone());
        resolved
    }

    /// Whether `iri` has been looked up (successfully or not)
    pub fn is_cached(&self, iri: &str) -> bool {
        self.0.read().contains_key(iri)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl fmt::Debug for ResolverCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRegistry {
        inner: SimpleRegistry,
        lookups: AtomicUsize,
    }

    impl FunctionRegistry for CountingRegistry {
        fn resolve(&self, iri: &str) -> Option<Callable> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(iri)
        }
    }

    fn registry() -> CountingRegistry {
        CountingRegistry {
            inner: SimpleRegistry::new().with("http://ex.org/one", |_, _, _| Ok(NodeValue::integer(1))),
            lookups: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_positive_results_are_cached() {
        let reg = registry();
        let cache = ResolverCache::new();
        assert!(cache.resolve("http://ex.org/one", &reg).is_some());
        assert!(cache.resolve("http://ex.org/one", &reg).is_some());
        assert_eq!(reg.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_negative_results_are_cached() {
        let reg = registry();
        let cache = ResolverCache::new();
        assert!(cache.resolve("http://ex.org/missing", &reg).is_none());
        assert!(cache.is_cached("http://ex.org/missing"));
        assert!(cache.resolve("http://ex.org/missing", &reg).is_none());
        assert_eq!(reg.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let reg = registry();
        let cache = ResolverCache::new();
        let clone = cache.clone();
        cache.resolve("http://ex.org/one", &reg);
        assert!(clone.is_cached("http://ex.org/one"));
        assert_eq!(clone.len(), 1);
    }
}
