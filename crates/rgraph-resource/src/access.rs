//! Post-access validation (spec §4.1.1) and meta-field back-fill on freeze
//! (spec §4.1.2). Both walk only the payload's *own* top-level fields — the
//! meta-field lists a payload carries are themselves per-payload, not
//! per-nested-struct, so there is nothing finer to walk.

use rgraph_path::{is_reserved, FieldType, Path, TypeShape};

use crate::error::AccessError;
use crate::payload::Payload;
use crate::zero::is_zero;

/// Validate a payload immediately after a caller-supplied mutation
/// (`access_v`), per field trait:
///
/// - `System`/`OutputOnly`: must still be zero.
/// - `AllowZeroValue`: no check.
/// - `Ordinary`/`NonZeroValue`/`Immutable`: zero requires a `null_fields`/
///   `force_send_fields` entry; non-zero conflicts with a `null_fields` entry.
pub fn check_post_access<T: Payload>(value: &T) -> Result<(), AccessError> {
    let TypeShape::Struct(fields) = T::shape() else {
        return Ok(());
    };
    let traits = T::field_traits();
    let json = value.to_value().unwrap_or(serde_json::Value::Null);
    let obj = json.as_object();

    let null_fields = value.null_fields();
    let force_send_fields = value.force_send_fields();

    for (name, _) in &fields {
        if is_reserved(name) {
            continue;
        }
        let field_type = traits.lookup(&Path::field(name.clone()));
        let field_value = obj.and_then(|o| o.get(name)).cloned().unwrap_or(serde_json::Value::Null);
        let zero = is_zero(&field_value);
        let listed_zero = null_fields.iter().any(|f| f == name) || force_send_fields.iter().any(|f| f == name);
        let listed_null = null_fields.iter().any(|f| f == name);

        match field_type {
            FieldType::System | FieldType::OutputOnly => {
                if !zero {
                    return Err(AccessError::InvalidFieldValue { field: name.clone() });
                }
            }
            FieldType::AllowZeroValue => {}
            FieldType::Ordinary | FieldType::NonZeroValue | FieldType::Immutable => {
                if zero && !listed_zero {
                    return Err(AccessError::ZeroWithoutMetaField { field: name.clone() });
                }
                if !zero && listed_null {
                    return Err(AccessError::ConflictingMetaField { field: name.clone() });
                }
            }
        }
    }
    Ok(())
}

/// Back-fill `null_fields`/`force_send_fields` for every `NonZeroValue` field
/// that is currently zero, ahead of a peer-variant copy on freeze. Pointer-
/// shaped fields go to `null_fields`; everything else to `force_send_fields`.
pub fn fill_null_and_force_send<T: Payload>(value: &mut T) {
    let TypeShape::Struct(fields) = T::shape() else {
        return;
    };
    let traits = T::field_traits();
    let json = value.to_value().unwrap_or(serde_json::Value::Null);
    let obj = json.as_object().cloned();

    for (name, field_shape) in &fields {
        if is_reserved(name) {
            continue;
        }
        if traits.lookup(&Path::field(name.clone())) != FieldType::NonZeroValue {
            continue;
        }
        let field_value = obj.as_ref().and_then(|o| o.get(name)).cloned().unwrap_or(serde_json::Value::Null);
        if !is_zero(&field_value) {
            continue;
        }
        if matches!(field_shape, TypeShape::Pointer(_)) {
            if !value.null_fields().iter().any(|f| f == name) {
                value.null_fields_mut().push(name.clone());
            }
        } else if !value.force_send_fields().iter().any(|f| f == name) {
            value.force_send_fields_mut().push(name.clone());
        }
    }
}
