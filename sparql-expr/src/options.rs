//! Evaluation options

use serde::{Deserialize, Serialize};
use sparql_value::{CompareOptions, DateTimeOrder};

/// Options for expression evaluation
///
/// Comparison behaviour lives in [`CompareOptions`]; the remaining fields
/// only affect individual builtins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Value-space and dateTime ordering options
    #[serde(flatten)]
    pub compare: CompareOptions,
    /// Base IRI used by `IRI()` to resolve relative references
    pub base_iri: Option<String>,
}

impl EvalOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the extended value spaces
    pub fn with_value_extensions(mut self, enabled: bool) -> Self {
        self.compare.value_extensions = enabled;
        self
    }

    /// Set the dateTime ordering mode
    pub fn with_datetime_order(mut self, order: DateTimeOrder) -> Self {
        self.compare.datetime_order = order;
        self
    }

    /// Set the base IRI for `IRI()`
    pub fn with_base_iri(mut self, base: impl Into<String>) -> Self {
        self.base_iri = Some(base.into());
        self
    }
}
