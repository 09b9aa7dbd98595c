//! [`FrozenResource`]: the read-only snapshot produced by [`crate::Resource::freeze`],
//! pinned to its implied version (spec §4.1).

use crate::identity::{ResourceID, Variant};
use crate::payload::{Payload, VariantSlot};

/// A resource snapshot that can no longer be mutated through `access_v`/`set_v`.
///
/// All three payloads were already kept mutually consistent by `Resource`
/// before freezing, and every non-implied real peer had its meta-fields
/// back-filled (spec §4.1.2), so `ga`/`alpha`/`beta` here agree with each
/// other to the extent their shapes allow.
#[derive(Debug, Clone)]
pub struct FrozenResource<G: Payload, A: Payload, B: Payload> {
    id: ResourceID,
    implied_version: Variant,
    ga: G,
    alpha: VariantSlot<A>,
    beta: VariantSlot<B>,
}

impl<G: Payload, A: Payload, B: Payload> FrozenResource<G, A, B> {
    pub(crate) fn new(id: ResourceID, implied_version: Variant, ga: G, alpha: VariantSlot<A>, beta: VariantSlot<B>) -> Self {
        Self { id, implied_version, ga, alpha, beta }
    }

    /// This resource's identity.
    #[must_use]
    pub fn id(&self) -> &ResourceID {
        &self.id
    }

    /// The narrowest variant this resource converts to without loss.
    #[must_use]
    pub fn implied_version(&self) -> Variant {
        self.implied_version
    }

    /// The GA payload, always present.
    #[must_use]
    pub fn ga(&self) -> &G {
        &self.ga
    }

    /// The Alpha payload, if this resource's Alpha variant is real.
    #[must_use]
    pub fn alpha(&self) -> Option<&A> {
        self.alpha.as_real()
    }

    /// The Beta payload, if this resource's Beta variant is real.
    #[must_use]
    pub fn beta(&self) -> Option<&B> {
        self.beta.as_real()
    }
}
