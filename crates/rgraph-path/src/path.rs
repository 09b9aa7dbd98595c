//! Structural paths into a resource.
//!
//! A [`Path`] is an ordered sequence of [`Step`]s describing how to reach a
//! leaf value inside a resource payload: struct field access, list indexing
//! (concrete or wildcard), map indexing (concrete or wildcard), and pointer
//! dereference.

use std::fmt;

/// A single structural step into a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Access a named struct field.
    Field(String),
    /// Access a concrete slice index.
    Index(usize),
    /// Access any slice index (wildcard).
    AnySliceIndex,
    /// Access a concrete map key.
    MapIndex(String),
    /// Access any map key (wildcard).
    AnyMapIndex,
    /// Dereference a pointer.
    Pointer,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::AnySliceIndex => write!(f, "[*]"),
            Self::MapIndex(k) => write!(f, "[{k:?}]"),
            Self::AnyMapIndex => write!(f, "[*]"),
            Self::Pointer => write!(f, "^"),
        }
    }
}

/// An ordered sequence of [`Step`]s locating a leaf inside a resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Path(Vec<Step>);

impl Path {
    /// The empty path (the resource root).
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from a field name, for the common case of a top-level field.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![Step::Field(name.into())])
    }

    /// Return a new path with `step` appended.
    #[must_use]
    pub fn join(&self, step: Step) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    /// Append a field access in place.
    pub fn push_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.0.push(Step::Field(name.into()));
        self
    }

    /// Append a step in place.
    pub fn push(&mut self, step: Step) -> &mut Self {
        self.0.push(step);
        self
    }

    /// Remove and return the last step, if any. The inverse of [`Path::push`],
    /// used by tree walkers that reuse one `Path` buffer as a cursor.
    pub fn pop(&mut self) -> Option<Step> {
        self.0.pop()
    }

    /// The steps making up this path.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// Whether this is the root (empty) path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Strict equality: no wildcard interpretation, `Index(1) != AnySliceIndex`.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// Symmetric wildcard-aware equality: same length, each step pairwise
    /// compatible (a concrete index matches a wildcard of the same kind).
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| step_matches(a, b))
    }

    /// Wildcard-aware prefix test: does `self` start with `prefix`, treating
    /// wildcards in either operand as matching any concrete counterpart?
    #[must_use]
    pub fn has_prefix(&self, prefix: &Self) -> bool {
        prefix.0.len() <= self.0.len()
            && self
                .0
                .iter()
                .zip(prefix.0.iter())
                .all(|(a, b)| step_matches(a, b))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for step in &self.0 {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn step_matches(a: &Step, b: &Step) -> bool {
    match (a, b) {
        (Step::Field(x), Step::Field(y)) => x == y,
        (Step::Index(x), Step::Index(y)) => x == y,
        (Step::Index(_), Step::AnySliceIndex) | (Step::AnySliceIndex, Step::Index(_)) => true,
        (Step::AnySliceIndex, Step::AnySliceIndex) => true,
        (Step::MapIndex(x), Step::MapIndex(y)) => x == y,
        (Step::MapIndex(_), Step::AnyMapIndex) | (Step::AnyMapIndex, Step::MapIndex(_)) => true,
        (Step::AnyMapIndex, Step::AnyMapIndex) => true,
        (Step::Pointer, Step::Pointer) => true,
        _ => false,
    }
}
