//! The [`Payload`] trait every concrete variant struct implements, and
//! [`VariantSlot`], the placeholder/real union for non-GA variants.
//!
//! Reflection is never used to walk a payload (spec.md §9's design note).
//! Instead a payload provides its own [`TypeShape`] and [`FieldTraits`] once,
//! and reduces itself to a `serde_json::Value` for the generic copier, access
//! validator, and differ to walk. This mirrors how the engine is described in
//! spec.md as "generate per-variant visitors at build time or hand-write them
//! per resource" — here the JSON value *is* the visitor target.

use rgraph_path::{FieldTraits, TypeShape};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A concrete resource variant payload (one GA, Alpha, or Beta struct).
pub trait Payload: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static {
    /// This payload's static shape, hand-written once per resource type.
    fn shape() -> TypeShape;

    /// This payload's field classification table, hand-written once.
    fn field_traits() -> FieldTraits;

    /// Fields the caller explicitly zeroed (pointer-shaped fields only).
    fn null_fields(&self) -> &[String];
    /// Mutable access to the above, for `fill_null_and_force_send`.
    fn null_fields_mut(&mut self) -> &mut Vec<String>;
    /// Fields the caller explicitly zeroed (non-pointer-shaped fields).
    fn force_send_fields(&self) -> &[String];
    /// Mutable access to the above, for `fill_null_and_force_send`.
    fn force_send_fields_mut(&mut self) -> &mut Vec<String>;

    /// Reduce this payload to its JSON structural representation.
    fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Rebuild a payload from its JSON structural representation.
    fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// A non-GA variant slot: either a real payload or a placeholder carrying
/// only identity and meta-fields (spec.md's "Placeholder" concept).
#[derive(Debug, Clone)]
pub enum VariantSlot<T: Payload> {
    /// The full payload is present.
    Real(T),
    /// Only identity/meta-field bookkeeping is present; operating on the
    /// payload itself is a [`crate::Error::PlaceholderMisuse`].
    Placeholder(PlaceholderData),
}

/// The bookkeeping a placeholder variant still carries.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderData {
    /// The instance name, if known.
    pub name: Option<String>,
    /// The `SelfLink`, if known.
    pub self_link: Option<String>,
    /// Meta-field names inherited from whichever variant created this one.
    pub null_fields: Vec<String>,
    /// Meta-field names inherited from whichever variant created this one.
    pub force_send_fields: Vec<String>,
}

impl<T: Payload> VariantSlot<T> {
    /// Whether this slot currently holds a real payload.
    #[must_use]
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    /// The real payload, if present.
    #[must_use]
    pub fn as_real(&self) -> Option<&T> {
        match self {
            Self::Real(payload) => Some(payload),
            Self::Placeholder(_) => None,
        }
    }
}

impl<T: Payload> Default for VariantSlot<T> {
    fn default() -> Self {
        Self::Placeholder(PlaceholderData::default())
    }
}
