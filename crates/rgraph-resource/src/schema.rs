//! Init-time schema check (spec §4.1): no structural cycles, only supported
//! leaf kinds, and every GA field present in its Alpha/Beta peers.
//!
//! [`TypeShape`] has no variant for an unsupported kind (a channel, a
//! function, ...), so that part of the check is enforced by the type system
//! rather than at runtime here. What remains to check at runtime is nesting
//! depth (a hand-written `shape()` that recurses into itself would otherwise
//! overflow the stack) and the GA-subset rule.

use rgraph_path::TypeShape;

use crate::error::{Error, Result};
use crate::identity::Variant;
use crate::payload::Payload;

/// Shapes deeper than this are treated as a structural cycle rather than a
/// legitimately deep resource.
const MAX_SHAPE_DEPTH: usize = 64;

/// Run every init-time schema check for a `Resource<G, A, B>` triple.
pub fn check_schema<G: Payload, A: Payload, B: Payload>() -> Result<()> {
    let ga = G::shape();
    let alpha = A::shape();
    let beta = B::shape();

    check_depth(&ga)?;
    check_depth(&alpha)?;
    check_depth(&beta)?;

    check_ga_subset(&ga, &alpha, Variant::Alpha)?;
    check_ga_subset(&ga, &beta, Variant::Beta)?;
    Ok(())
}

fn check_depth(shape: &TypeShape) -> Result<()> {
    walk_depth(shape, 0)
}

fn walk_depth(shape: &TypeShape, depth: usize) -> Result<()> {
    if depth > MAX_SHAPE_DEPTH {
        return Err(Error::SchemaCycle(MAX_SHAPE_DEPTH));
    }
    match shape {
        TypeShape::Struct(fields) => {
            for (_, field_shape) in fields {
                walk_depth(field_shape, depth + 1)?;
            }
        }
        TypeShape::Slice(inner) | TypeShape::Map(inner) | TypeShape::Pointer(inner) => {
            walk_depth(inner, depth + 1)?;
        }
        TypeShape::Bool | TypeShape::Int | TypeShape::Float | TypeShape::Str => {}
    }
    Ok(())
}

/// Every top-level field of `ga` must have a same-named counterpart in `peer`.
fn check_ga_subset(ga: &TypeShape, peer: &TypeShape, variant: Variant) -> Result<()> {
    let (TypeShape::Struct(ga_fields), TypeShape::Struct(peer_fields)) = (ga, peer) else {
        return Ok(());
    };
    for (name, _) in ga_fields {
        if !peer_fields.iter().any(|(peer_name, _)| peer_name == name) {
            return Err(Error::GaNotSubset { field: name.clone(), variant });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_shallow_struct() {
        let shape = TypeShape::Struct(vec![("name".into(), TypeShape::Str)]);
        assert!(check_depth(&shape).is_ok());
    }

    #[test]
    fn rejects_a_pathologically_deep_shape() {
        let mut shape = TypeShape::Str;
        for _ in 0..MAX_SHAPE_DEPTH + 2 {
            shape = TypeShape::Pointer(Box::new(shape));
        }
        let err = check_depth(&shape).unwrap_err();
        assert!(matches!(err, Error::SchemaCycle(_)));
    }

    #[test]
    fn ga_field_missing_from_a_peer_is_rejected() {
        let ga = TypeShape::Struct(vec![("name".into(), TypeShape::Str), ("ga_only".into(), TypeShape::Bool)]);
        let alpha = TypeShape::Struct(vec![("name".into(), TypeShape::Str)]);
        let err = check_ga_subset(&ga, &alpha, Variant::Alpha).unwrap_err();
        assert!(matches!(err, Error::GaNotSubset { field, variant: Variant::Alpha } if field == "ga_only"));
    }
}
