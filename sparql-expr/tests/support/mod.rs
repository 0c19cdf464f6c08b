//! Shared helpers for the integration tests.
//!
//! - row builders
//! - `MockPlan` / `FnExecutor` stand-ins for the surrounding engine's algebra
//! - `SpanCapture`, a `tracing-subscriber` layer recording spans and events

#![allow(dead_code)]

use sparql_expr::{AlgebraPlan, EvalContext, Expression, RowAccess, Term, Var};
use sparql_value::vocab::xsd;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

// =============================================================================
// Rows and terms
// =============================================================================

pub fn int(n: i64) -> Term {
    Term::typed(n.to_string(), xsd::INTEGER)
}

pub fn string(s: &str) -> Term {
    Term::plain(s)
}

pub fn iri(s: &str) -> Term {
    Term::iri(s)
}

/// A row from `(name, term)` pairs
pub fn row(bindings: &[(&str, Term)]) -> sparql_expr::BindingRow {
    bindings
        .iter()
        .map(|(name, term)| (Var::new(name), term.clone()))
        .collect()
}

pub fn empty_row() -> sparql_expr::BindingRow {
    sparql_expr::BindingRow::new()
}

// =============================================================================
// Algebra stand-ins
// =============================================================================

/// A named plan that only tracks its variables
///
/// `substitute` records the terms it was given and drops the substituted
/// variables from `mentioned`, the way a real plan would inline them.
#[derive(Debug, Clone)]
pub struct MockPlan {
    pub name: String,
    pub mentioned: BTreeSet<Var>,
    pub scoped: BTreeSet<Var>,
    pub inlined: Vec<(Var, Term)>,
}

impl MockPlan {
    pub fn new(name: &str, mentioned: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            mentioned: mentioned.iter().map(Var::new).collect(),
            scoped: BTreeSet::new(),
            inlined: Vec::new(),
        }
    }

    /// Mark `vars` as bound only inside the plan
    pub fn scoping(mut self, vars: &[&str]) -> Self {
        self.scoped = vars.iter().map(Var::new).collect();
        self
    }

    pub fn into_arc(self) -> Arc<dyn AlgebraPlan> {
        Arc::new(self)
    }
}

impl fmt::Display for MockPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(plan {}", self.name)?;
        for var in &self.mentioned {
            write!(f, " {}", var)?;
        }
        for (var, term) in &self.inlined {
            write!(f, " ({} {})", var, term)?;
        }
        write!(f, ")")
    }
}

impl AlgebraPlan for MockPlan {
    fn mentioned_vars(&self) -> BTreeSet<Var> {
        self.mentioned.clone()
    }

    fn scoped_vars(&self) -> BTreeSet<Var> {
        self.scoped.clone()
    }

    fn substitute(&self, row: &dyn RowAccess) -> Option<Arc<dyn AlgebraPlan>> {
        let mut next = self.clone();
        for var in &self.mentioned {
            if self.scoped.contains(var) {
                continue;
            }
            if let Some(term) = row.get(var) {
                next.mentioned.remove(var);
                next.inlined.push((var.clone(), term.clone()));
            }
        }
        (next.inlined.len() != self.inlined.len()).then(|| next.into_arc())
    }

    fn plan_eq(&self, other: &dyn AlgebraPlan) -> bool {
        self.to_string() == other.to_string()
    }

    fn plan_hash(&self, state: &mut dyn Hasher) {
        state.write(self.to_string().as_bytes());
    }
}

/// Executor answering EXISTS with a closure, counting calls
pub struct FnExecutor<F> {
    f: F,
    pub calls: AtomicUsize,
}

impl<F> FnExecutor<F>
where
    F: Fn(&dyn AlgebraPlan, &dyn RowAccess) -> bool + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<F> sparql_expr::SubPlanExecutor for FnExecutor<F>
where
    F: Fn(&dyn AlgebraPlan, &dyn RowAccess) -> bool + Send + Sync,
{
    fn exists(
        &self,
        plan: &dyn AlgebraPlan,
        row: &dyn RowAccess,
        _ctx: &EvalContext<'_>,
    ) -> sparql_expr::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.f)(plan, row))
    }
}

/// Evaluate with a default context
pub fn eval(expr: &Expression, row: &dyn RowAccess) -> sparql_expr::Result<sparql_expr::NodeValue> {
    expr.evaluate(row, &EvalContext::new())
}

// =============================================================================
// Span and event capture
// =============================================================================

#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: &'static str,
    pub level: tracing::Level,
    pub fields: HashMap<String, String>,
    pub parent_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
    pub fields: HashMap<String, String>,
    pub span_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SpanStore {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl SpanStore {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_span(&self, name: &str) -> bool {
        self.spans.lock().unwrap().iter().any(|s| s.name == name)
    }

    pub fn find_span(&self, name: &str) -> Option<CapturedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    /// Events whose message contains `needle`
    pub fn find_events(&self, needle: &str) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message.contains(needle))
            .cloned()
            .collect()
    }
}

pub struct SpanCapture {
    store: SpanStore,
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> Layer<S> for SpanCapture
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = FieldVisitor(HashMap::new());
        attrs.record(&mut fields);

        let parent_name = attrs
            .parent()
            .and_then(|pid| ctx.span(pid))
            .map(|span| span.name().to_string())
            .or_else(|| ctx.lookup_current().map(|span| span.name().to_string()));

        let span_ref = ctx.span(id).expect("span should exist");
        let meta = span_ref.metadata();

        self.store.spans.lock().unwrap().push(CapturedSpan {
            name: meta.name(),
            level: *meta.level(),
            fields: fields.0,
            parent_name,
        });
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = FieldVisitor(HashMap::new());
        event.record(&mut fields);
        let message = fields.0.remove("message").unwrap_or_default();
        let span_name = ctx.lookup_current().map(|span| span.name().to_string());

        self.store.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: fields.0,
            span_name,
        });
    }
}

/// Install a capturing subscriber for the current thread.
///
/// Hold the guard for the duration of the test.
pub fn init_test_tracing() -> (SpanStore, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt;

    let store = SpanStore::default();
    let subscriber = tracing_subscriber::registry().with(SpanCapture {
        store: store.clone(),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    (store, guard)
}
