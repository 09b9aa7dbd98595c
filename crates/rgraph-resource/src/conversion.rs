//! Standalone structural conversion between two payload types (spec
//! §4.1.3), independent of [`crate::Resource`]'s propagation bookkeeping.
//! Used directly by `rgraph-diff` to materialize one variant's payload in
//! another variant's shape ahead of a cross-variant diff (spec §4.2), and by
//! `Resource` itself to keep its peer variants in sync.

use crate::copier::{copy_structural, union_meta_fields};
use crate::error::{ConversionError, Result};
use crate::identity::Variant;
use crate::payload::Payload;

/// Convert `src` into `Dst`'s shape, field by matching name.
///
/// Returns the converted payload plus the set of source leaves that had no
/// destination counterpart (empty if the conversion was lossless).
pub fn convert<Src: Payload, Dst: Payload>(
    src: &Src,
    direction: (Variant, Variant),
) -> Result<(Dst, ConversionError)> {
    let src_value = src.to_value()?;
    let dst_seed = Dst::default().to_value()?;
    let mut missing = Vec::new();
    let copied = copy_structural(&src_value, &Src::shape(), &dst_seed, &Dst::shape(), direction, &mut missing);
    let mut rebuilt = Dst::from_value(copied)?;

    union_meta_fields(src.null_fields(), rebuilt.null_fields_mut(), &Dst::shape());
    union_meta_fields(src.force_send_fields(), rebuilt.force_send_fields_mut(), &Dst::shape());

    Ok((rebuilt, ConversionError { missing }))
}
