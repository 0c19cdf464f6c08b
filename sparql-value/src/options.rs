//! Comparison configuration

use serde::{Deserialize, Serialize};

/// How dateTime-family values without a timezone are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateTimeOrder {
    /// XML Schema partial order: a value without a timezone is compared
    /// against the other side over the full +/-14h range, which can leave the
    /// result indeterminate.
    #[default]
    Xsd,
    /// XPath F&O style: a missing timezone is taken as UTC, giving a total order
    ImplicitUtc,
}

/// Options controlling value-space classification and comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Recognize date, time, duration, g* and language-tagged value spaces.
    ///
    /// When disabled only numeric, dateTime, string, boolean and non-literal
    /// terms are classified; every other pair falls back to raw term equality.
    pub value_extensions: bool,
    /// Ordering mode for dateTime-family values
    pub datetime_order: DateTimeOrder,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            value_extensions: true,
            datetime_order: DateTimeOrder::Xsd,
        }
    }
}

impl CompareOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the extended value spaces
    pub fn with_value_extensions(mut self, enabled: bool) -> Self {
        self.value_extensions = enabled;
        self
    }

    /// Set the dateTime ordering mode
    pub fn with_datetime_order(mut self, order: DateTimeOrder) -> Self {
        self.datetime_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = CompareOptions::new();
        assert!(opts.value_extensions);
        assert_eq!(opts.datetime_order, DateTimeOrder::Xsd);
    }

    #[test]
    fn test_builder() {
        let opts = CompareOptions::new()
            .with_value_extensions(false)
            .with_datetime_order(DateTimeOrder::ImplicitUtc);
        assert!(!opts.value_extensions);
        assert_eq!(opts.datetime_order, DateTimeOrder::ImplicitUtc);
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: CompareOptions =
            serde_json::from_str(r#"{"datetime_order":"implicit-utc"}"#).unwrap();
        assert!(opts.value_extensions);
        assert_eq!(opts.datetime_order, DateTimeOrder::ImplicitUtc);
    }
}
