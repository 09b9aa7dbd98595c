//! The result shape produced by [`crate::diff`].

use rgraph_path::Path;
use serde_json::Value;

/// How a leaf differed between the two payloads compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffState {
    /// Present and unequal on both sides.
    Different,
    /// Only meaningfully present on the `a` side.
    OnlyInA,
    /// Only meaningfully present on the `b` side.
    OnlyInB,
}

/// One recorded difference between two payloads at a given [`Path`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiffItem {
    /// How the two sides differed.
    pub state: DiffState,
    /// Where in the payload the difference was found.
    pub path: Path,
    /// The `a`-side value, if meaningfully present.
    pub a: Option<Value>,
    /// The `b`-side value, if meaningfully present.
    pub b: Option<Value>,
}

/// The full set of differences found between two payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    /// Every recorded difference, in the order the walk encountered them.
    pub items: Vec<DiffItem>,
}

impl DiffResult {
    /// Whether no differences were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any recorded difference's path has `prefix` as a (possibly
    /// wildcard) prefix — the question the planner asks to decide whether a
    /// specific immutable field changed.
    #[must_use]
    pub fn touches(&self, prefix: &Path) -> bool {
        self.items.iter().any(|item| item.path.has_prefix(prefix))
    }
}
