//! Query variables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A named query variable
///
/// Stored without the `?`/`$` sigil; `Var::new("?x") == Var::new("x")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Var(Arc<str>);

impl Var {
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        let bare = name
            .strip_prefix('?')
            .or_else(|| name.strip_prefix('$'))
            .unwrap_or(name);
        Var(Arc::from(bare))
    }

    /// Name without the sigil
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Var::new(name)
    }
}

impl From<String> for Var {
    fn from(name: String) -> Self {
        Var::new(name)
    }
}
