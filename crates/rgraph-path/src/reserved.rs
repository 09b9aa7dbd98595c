//! Names of the meta-fields every resource payload carries alongside its
//! ordinary data fields. These are never themselves copied, diffed, or
//! classified by [`crate::FieldTraits`] — they *record* how copying and
//! access validation treated the other fields.

/// Records fields whose zero value was intentional (pointer-shaped).
pub const NULL_FIELDS: &str = "null_fields";
/// Records fields whose zero value was intentional (non-pointer-shaped).
pub const FORCE_SEND_FIELDS: &str = "force_send_fields";
/// Server-populated wrapper, never part of the logical payload.
pub const SERVER_RESPONSE: &str = "server_response";

/// Whether `name` is one of the reserved meta-field names above.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    matches!(name, NULL_FIELDS | FORCE_SEND_FIELDS | SERVER_RESPONSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_reserved_names() {
        assert!(is_reserved("null_fields"));
        assert!(is_reserved("force_send_fields"));
        assert!(!is_reserved("name"));
    }
}
