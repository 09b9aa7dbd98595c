//! Field-type classification and the per-variant field-trait table.

use crate::Path;

/// How a field participates in access validation, copying, and diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Compared by value; must be non-zero or meta-field-listed.
    Ordinary,
    /// Never copied, never diffed; must be zero on user input.
    System,
    /// Server-populated; never copied or diffed; must be zero on user input.
    OutputOnly,
    /// Ordinary but permitted to be zero without a meta-field listing.
    AllowZeroValue,
    /// Must be non-zero or meta-field-listed; auto-inserted into the
    /// meta-field lists on freeze when zero.
    NonZeroValue,
    /// Compared by value like `Ordinary`; a change here forces the planner
    /// to recreate rather than update the resource (e.g. `LoadBalancingScheme`,
    /// `Network`).
    Immutable,
}

/// An ordered, first-match-wins table of `(Path, FieldType)` entries for one
/// resource variant.
///
/// Lookup matches the queried path against each registered path via
/// [`Path::has_prefix`], honoring wildcard steps, and returns the first hit.
/// A path with no matching entry is treated as [`FieldType::Ordinary`].
#[derive(Debug, Clone, Default)]
pub struct FieldTraits {
    entries: Vec<(Path, FieldType)>,
    /// Paths whose value is itself a cross-resource reference (a `SelfLink`),
    /// registered so `out_refs()` can discover them without reflection.
    ref_paths: Vec<Path>,
}

impl FieldTraits {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field-type entry, builder-style.
    #[must_use]
    pub fn with(mut self, path: Path, field_type: FieldType) -> Self {
        self.entries.push((path, field_type));
        self
    }

    /// Register a path as holding a `SelfLink`-typed cross-resource reference.
    #[must_use]
    pub fn with_ref(mut self, path: Path) -> Self {
        self.ref_paths.push(path);
        self
    }

    /// Push an entry in place.
    pub fn push(&mut self, path: Path, field_type: FieldType) -> &mut Self {
        self.entries.push((path, field_type));
        self
    }

    /// Classify the field reached by `path`.
    #[must_use]
    pub fn lookup(&self, path: &Path) -> FieldType {
        self.entries
            .iter()
            .find(|(registered, _)| path.has_prefix(registered))
            .map_or(FieldType::Ordinary, |(_, field_type)| *field_type)
    }

    /// The registered reference paths, in registration order.
    #[must_use]
    pub fn ref_paths(&self) -> &[Path] {
        &self.ref_paths
    }

    /// The paths registered as [`FieldType::Immutable`], for the planner's
    /// recreate-vs-update classification.
    #[must_use]
    pub fn immutable_paths(&self) -> Vec<&Path> {
        self.entries.iter().filter(|(_, field_type)| *field_type == FieldType::Immutable).map(|(path, _)| path).collect()
    }
}
