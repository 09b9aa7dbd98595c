//! [`Resource`]: a single logical resource held simultaneously as GA plus
//! (possibly placeholder) Alpha and Beta payloads, kept cross-converted on
//! every mutation (spec §4.1).

use std::collections::HashMap;

use crate::access::{check_post_access, fill_null_and_force_send};
use crate::conversion::convert;
use crate::error::{ConversionError, Error, Result};
use crate::frozen::FrozenResource;
use crate::identity::{ResourceID, Variant};
use crate::payload::{Payload, VariantSlot};
use crate::schema::check_schema;

/// A resource held simultaneously in GA, Alpha, and Beta form.
///
/// GA is always a real payload (there is no such thing as a GA placeholder);
/// Alpha and Beta may be placeholders until the cloud actually returns data
/// for them. GA acts as the conversion hub: mutating Alpha or Beta always
/// re-derives GA, and re-derives the other non-GA peer only if it is
/// currently real.
#[derive(Debug, Clone)]
pub struct Resource<G: Payload, A: Payload, B: Payload> {
    id: ResourceID,
    ga: G,
    alpha: VariantSlot<A>,
    beta: VariantSlot<B>,
    conversion_missing: HashMap<Variant, ConversionError>,
}

impl<G: Payload, A: Payload, B: Payload> Resource<G, A, B> {
    /// Construct a resource with GA populated and Alpha/Beta as placeholders.
    ///
    /// Runs the init-time schema check (spec §4.1: no structural cycles, GA
    /// a structural subset of Alpha/Beta) over `G`/`A`/`B` before accepting
    /// `ga`. The check depends only on the three types' static shapes, not on
    /// `ga`'s value, so it is cheap to re-run on every construction rather
    /// than requiring a separate one-time registration step.
    pub fn new(id: ResourceID, ga: G) -> Result<Self> {
        check_schema::<G, A, B>()?;
        Ok(Self { id, ga, alpha: VariantSlot::default(), beta: VariantSlot::default(), conversion_missing: HashMap::new() })
    }

    /// This resource's identity.
    #[must_use]
    pub fn id(&self) -> &ResourceID {
        &self.id
    }

    /// Mutate the GA payload, validate it, and propagate the result to any
    /// real Alpha/Beta peer.
    ///
    /// `f` runs against a clone so a validation failure leaves `self`
    /// untouched (spec §7: "Access-validation errors abort that access,
    /// leaving the resource in its pre-call state.").
    pub fn access_ga<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut G) -> R,
    {
        let mut candidate = self.ga.clone();
        let result = f(&mut candidate);
        check_post_access(&candidate)?;
        self.ga = candidate;
        self.propagate_from_ga()?;
        Ok(result)
    }

    /// Mutate the Alpha payload. Errors if Alpha is currently a placeholder.
    ///
    /// `f` runs against a clone so a validation failure leaves `self`
    /// untouched (spec §7).
    pub fn access_alpha<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut A) -> R,
    {
        let VariantSlot::Real(payload) = &self.alpha else {
            return Err(Error::PlaceholderMisuse(Variant::Alpha));
        };
        let mut candidate = payload.clone();
        let result = f(&mut candidate);
        check_post_access(&candidate)?;
        self.alpha = VariantSlot::Real(candidate);
        self.propagate_from_alpha()?;
        Ok(result)
    }

    /// Mutate the Beta payload. Errors if Beta is currently a placeholder.
    ///
    /// `f` runs against a clone so a validation failure leaves `self`
    /// untouched (spec §7).
    pub fn access_beta<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut B) -> R,
    {
        let VariantSlot::Real(payload) = &self.beta else {
            return Err(Error::PlaceholderMisuse(Variant::Beta));
        };
        let mut candidate = payload.clone();
        let result = f(&mut candidate);
        check_post_access(&candidate)?;
        self.beta = VariantSlot::Real(candidate);
        self.propagate_from_beta()?;
        Ok(result)
    }

    /// Overwrite the GA payload outright (e.g. from a cloud read), skipping
    /// [`check_post_access`], and propagate to real peers.
    pub fn set_ga(&mut self, payload: G) -> Result<()> {
        self.ga = payload;
        self.propagate_from_ga()
    }

    /// Overwrite the Alpha payload outright, turning a placeholder real.
    pub fn set_alpha(&mut self, payload: A) -> Result<()> {
        self.alpha = VariantSlot::Real(payload);
        self.propagate_from_alpha()
    }

    /// Overwrite the Beta payload outright, turning a placeholder real.
    pub fn set_beta(&mut self, payload: B) -> Result<()> {
        self.beta = VariantSlot::Real(payload);
        self.propagate_from_beta()
    }

    /// The GA payload plus, if conversions into GA last dropped fields, the
    /// resulting [`ConversionError`].
    #[must_use]
    pub fn to_ga(&self) -> (G, Option<ConversionError>) {
        (self.ga.clone(), self.missing_into(Variant::Ga))
    }

    /// The Alpha payload plus any conversion loss, or
    /// [`Error::PlaceholderMisuse`] if Alpha is a placeholder.
    pub fn to_alpha(&self) -> Result<(A, Option<ConversionError>)> {
        match &self.alpha {
            VariantSlot::Real(payload) => Ok((payload.clone(), self.missing_into(Variant::Alpha))),
            VariantSlot::Placeholder(_) => Err(Error::PlaceholderMisuse(Variant::Alpha)),
        }
    }

    /// The Beta payload plus any conversion loss, or
    /// [`Error::PlaceholderMisuse`] if Beta is a placeholder.
    pub fn to_beta(&self) -> Result<(B, Option<ConversionError>)> {
        match &self.beta {
            VariantSlot::Real(payload) => Ok((payload.clone(), self.missing_into(Variant::Beta))),
            VariantSlot::Placeholder(_) => Err(Error::PlaceholderMisuse(Variant::Beta)),
        }
    }

    /// The smallest variant (GA, then Beta, then Alpha) whose last conversion
    /// dropped no fields. [`Error::IndeterminateVersion`] if none qualifies.
    pub fn implied_version(&self) -> Result<Variant> {
        if self.missing_into(Variant::Ga).is_none() {
            return Ok(Variant::Ga);
        }
        if self.beta.is_real() && self.missing_into(Variant::Beta).is_none() {
            return Ok(Variant::Beta);
        }
        if self.alpha.is_real() && self.missing_into(Variant::Alpha).is_none() {
            return Ok(Variant::Alpha);
        }
        Err(Error::IndeterminateVersion)
    }

    /// Back-fill meta-fields on every non-implied real peer and consume this
    /// resource into a [`FrozenResource`] pinned to its implied version.
    pub fn freeze(mut self) -> Result<FrozenResource<G, A, B>> {
        let implied = self.implied_version()?;

        if implied != Variant::Ga {
            fill_null_and_force_send(&mut self.ga);
        }
        if implied != Variant::Alpha {
            if let VariantSlot::Real(payload) = &mut self.alpha {
                fill_null_and_force_send(payload);
            }
        }
        if implied != Variant::Beta {
            if let VariantSlot::Real(payload) = &mut self.beta {
                fill_null_and_force_send(payload);
            }
        }

        Ok(FrozenResource::new(self.id, implied, self.ga, self.alpha, self.beta))
    }

    fn missing_into(&self, variant: Variant) -> Option<ConversionError> {
        self.conversion_missing.get(&variant).cloned().filter(|err| !err.missing.is_empty())
    }

    fn propagate_from_ga(&mut self) -> Result<()> {
        if let VariantSlot::Real(alpha) = &mut self.alpha {
            copy_into(&self.ga, alpha, (Variant::Ga, Variant::Alpha), &mut self.conversion_missing)?;
        }
        if let VariantSlot::Real(beta) = &mut self.beta {
            copy_into(&self.ga, beta, (Variant::Ga, Variant::Beta), &mut self.conversion_missing)?;
        }
        Ok(())
    }

    fn propagate_from_alpha(&mut self) -> Result<()> {
        let VariantSlot::Real(alpha) = &self.alpha else {
            return Err(Error::PlaceholderMisuse(Variant::Alpha));
        };
        let alpha = alpha.clone();
        copy_into(&alpha, &mut self.ga, (Variant::Alpha, Variant::Ga), &mut self.conversion_missing)?;
        if let VariantSlot::Real(beta) = &mut self.beta {
            copy_into(&alpha, beta, (Variant::Alpha, Variant::Beta), &mut self.conversion_missing)?;
        }
        Ok(())
    }

    fn propagate_from_beta(&mut self) -> Result<()> {
        let VariantSlot::Real(beta) = &self.beta else {
            return Err(Error::PlaceholderMisuse(Variant::Beta));
        };
        let beta = beta.clone();
        copy_into(&beta, &mut self.ga, (Variant::Beta, Variant::Ga), &mut self.conversion_missing)?;
        if let VariantSlot::Real(alpha) = &mut self.alpha {
            copy_into(&beta, alpha, (Variant::Beta, Variant::Alpha), &mut self.conversion_missing)?;
        }
        Ok(())
    }
}

/// Converts `src` into `dst` and records the resulting [`ConversionError`]
/// keyed by `direction`'s destination variant only, overwriting whatever was
/// previously recorded for that destination. Keying by destination (rather
/// than by the full `(from, to)` pair) keeps `missing_into` a single
/// well-defined lookup per variant: every real peer has exactly one most
/// recent conversion into it, regardless of which other variant produced it.
fn copy_into<Src: Payload, Dst: Payload>(
    src: &Src,
    dst: &mut Dst,
    direction: (Variant, Variant),
    conversion_missing: &mut HashMap<Variant, ConversionError>,
) -> Result<()> {
    let (rebuilt, err) = convert(src, direction)?;
    *dst = rebuilt;
    conversion_missing.insert(direction.1, err);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ResourceKey;
    use rgraph_path::{FieldTraits, FieldType, Path, TypeShape};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Ga {
        name: String,
        replicas: i64,
        #[serde(default)]
        null_fields: Vec<String>,
        #[serde(default)]
        force_send_fields: Vec<String>,
    }

    impl Payload for Ga {
        fn shape() -> TypeShape {
            TypeShape::Struct(vec![("name".into(), TypeShape::Str), ("replicas".into(), TypeShape::Int)])
        }
        fn field_traits() -> FieldTraits {
            FieldTraits::new().with(Path::field("replicas"), FieldType::AllowZeroValue)
        }
        fn null_fields(&self) -> &[String] {
            &self.null_fields
        }
        fn null_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.null_fields
        }
        fn force_send_fields(&self) -> &[String] {
            &self.force_send_fields
        }
        fn force_send_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.force_send_fields
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Alpha {
        name: String,
        replicas: i64,
        alpha_only: String,
        #[serde(default)]
        null_fields: Vec<String>,
        #[serde(default)]
        force_send_fields: Vec<String>,
    }

    impl Payload for Alpha {
        fn shape() -> TypeShape {
            TypeShape::Struct(vec![
                ("name".into(), TypeShape::Str),
                ("replicas".into(), TypeShape::Int),
                ("alpha_only".into(), TypeShape::Str),
            ])
        }
        fn field_traits() -> FieldTraits {
            FieldTraits::new()
                .with(Path::field("replicas"), FieldType::AllowZeroValue)
                .with(Path::field("alpha_only"), FieldType::AllowZeroValue)
        }
        fn null_fields(&self) -> &[String] {
            &self.null_fields
        }
        fn null_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.null_fields
        }
        fn force_send_fields(&self) -> &[String] {
            &self.force_send_fields
        }
        fn force_send_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.force_send_fields
        }
    }

    fn id() -> ResourceID {
        ResourceID::new("proj", "compute", "backendServices", ResourceKey::Global("bs-test".into()))
    }

    #[test]
    fn access_ga_propagates_to_a_real_alpha_peer() {
        let mut res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        res.set_alpha(Alpha::default()).unwrap();
        res.access_ga(|ga| ga.name = "svc".into()).unwrap();
        assert_eq!(res.to_alpha().unwrap().0.name, "svc");
    }

    #[test]
    fn copy_symmetry_round_trips_ga_unchanged() {
        let mut res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        res.set_alpha(Alpha::default()).unwrap();
        res.access_ga(|ga| ga.name = "svc".into()).unwrap();
        let before = res.to_ga().0;
        res.access_alpha(|_| {}).unwrap();
        assert_eq!(res.to_ga().0, before);
    }

    #[test]
    fn accessing_a_placeholder_variant_is_rejected() {
        let mut res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        let err = res.access_alpha(|a| a.name = "x".into()).unwrap_err();
        assert!(matches!(err, Error::PlaceholderMisuse(Variant::Alpha)));
    }

    #[test]
    fn conversion_loss_is_reported_on_to_ga() {
        let mut res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        res.set_alpha(Alpha::default()).unwrap();
        res.access_alpha(|a| a.alpha_only = "x".into()).unwrap();
        let (_, missing) = res.to_ga();
        let missing = missing.unwrap();
        assert_eq!(missing.missing.len(), 1);
        assert_eq!(missing.missing[0].path.to_string(), ".alpha_only");
    }

    #[test]
    fn implied_version_prefers_ga_when_lossless() {
        let res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        assert_eq!(res.implied_version().unwrap(), Variant::Ga);
    }

    #[test]
    fn implied_version_is_indeterminate_when_alpha_only_field_is_set() {
        let mut res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        res.set_alpha(Alpha { alpha_only: "x".into(), ..Default::default() }).unwrap();
        assert!(matches!(res.implied_version(), Err(Error::IndeterminateVersion)));
    }

    #[test]
    fn a_later_clean_conversion_into_ga_clears_an_earlier_lossy_one() {
        // Both peers here are `Alpha`, so this exercises copy_into from two
        // different sources into the same destination (Ga). Keying
        // conversion_missing by destination only means the second, clean
        // conversion overwrites the first's lossy record instead of leaving
        // both around for `missing_into` to pick between nondeterministically.
        let mut res = Resource::<Ga, Alpha, Alpha>::new(id(), Ga::default()).unwrap();
        res.set_alpha(Alpha::default()).unwrap();
        res.set_beta(Alpha::default()).unwrap();

        res.access_alpha(|a| a.alpha_only = "x".into()).unwrap();
        assert!(res.to_ga().1.is_some());

        res.access_beta(|b| b.alpha_only = String::new()).unwrap();
        assert!(res.to_ga().1.is_none());
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Beta {
        name: String,
        replicas: i64,
        #[serde(default)]
        null_fields: Vec<String>,
        #[serde(default)]
        force_send_fields: Vec<String>,
    }

    impl Payload for Beta {
        fn shape() -> TypeShape {
            TypeShape::Struct(vec![("name".into(), TypeShape::Str), ("replicas".into(), TypeShape::Int)])
        }
        fn field_traits() -> FieldTraits {
            FieldTraits::new().with(Path::field("replicas"), FieldType::NonZeroValue)
        }
        fn null_fields(&self) -> &[String] {
            &self.null_fields
        }
        fn null_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.null_fields
        }
        fn force_send_fields(&self) -> &[String] {
            &self.force_send_fields
        }
        fn force_send_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.force_send_fields
        }
    }

    #[test]
    fn freeze_back_fills_non_zero_value_fields_on_non_implied_real_peers() {
        let mut res = Resource::<Ga, Alpha, Beta>::new(id(), Ga { name: "svc".into(), ..Default::default() }).unwrap();
        res.set_beta(Beta { name: "svc".into(), ..Default::default() }).unwrap();
        let frozen = res.freeze().unwrap();
        assert_eq!(frozen.implied_version(), Variant::Ga);
        assert!(frozen.beta().unwrap().force_send_fields.contains(&"replicas".to_string()));
    }

    #[test]
    fn freeze_then_to_alpha_on_a_placeholder_errors() {
        let res = Resource::<Ga, Alpha, Beta>::new(id(), Ga::default()).unwrap();
        let frozen = res.freeze().unwrap();
        assert!(frozen.alpha().is_none());
    }
}
