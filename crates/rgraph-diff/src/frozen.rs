//! Diff between two [`FrozenResource`]s of the same resource type, resolving
//! a common variant first (spec §4.2: "Diff on a `FrozenResource` is defined
//! for pairs at the same version directly and for GA↔Alpha / GA↔Beta via
//! conversion to the non-GA side; Alpha↔Beta is rejected").

use rgraph_resource::{convert, FrozenResource, Payload, Variant};

use crate::engine::diff;
use crate::{Error, Result};
use crate::result::DiffResult;

/// Diff `a` against `b`, converting whichever side is GA into the other's
/// shape if their implied versions differ.
pub fn diff_frozen<G: Payload, A: Payload, B: Payload>(
    a: &FrozenResource<G, A, B>,
    b: &FrozenResource<G, A, B>,
) -> Result<DiffResult> {
    match (a.implied_version(), b.implied_version()) {
        (Variant::Ga, Variant::Ga) => diff(a.ga(), b.ga()),

        (Variant::Alpha, Variant::Alpha) => diff_real(a.alpha(), b.alpha()),
        (Variant::Beta, Variant::Beta) => diff_real(a.beta(), b.beta()),

        (Variant::Ga, Variant::Alpha) => {
            let (a_alpha, _) = convert::<G, A>(a.ga(), (Variant::Ga, Variant::Alpha))?;
            diff_real(Some(&a_alpha), b.alpha())
        }
        (Variant::Alpha, Variant::Ga) => {
            let (b_alpha, _) = convert::<G, A>(b.ga(), (Variant::Ga, Variant::Alpha))?;
            diff_real(a.alpha(), Some(&b_alpha))
        }

        (Variant::Ga, Variant::Beta) => {
            let (a_beta, _) = convert::<G, B>(a.ga(), (Variant::Ga, Variant::Beta))?;
            diff_real(Some(&a_beta), b.beta())
        }
        (Variant::Beta, Variant::Ga) => {
            let (b_beta, _) = convert::<G, B>(b.ga(), (Variant::Ga, Variant::Beta))?;
            diff_real(a.beta(), Some(&b_beta))
        }

        (Variant::Alpha, Variant::Beta) | (Variant::Beta, Variant::Alpha) => Err(Error::UnsupportedVariantPair),
    }
}

fn diff_real<T: Payload>(a: Option<&T>, b: Option<&T>) -> Result<DiffResult> {
    match (a, b) {
        (Some(a), Some(b)) => diff(a, b),
        _ => Err(Error::UnsupportedVariantPair),
    }
}
