//! Multi-variant resource model (spec §4.1).
//!
//! A single logical resource is held simultaneously as GA/Alpha/Beta
//! payloads ([`Resource`]); mutating any real variant re-derives the others
//! via the structural copier, recording any leaf that could not be carried
//! across. [`Resource::freeze`] produces a [`FrozenResource`] pinned to the
//! resource's implied version, after back-filling meta-fields on every
//! non-implied peer.

mod access;
mod conversion;
mod copier;
mod error;
mod frozen;
mod identity;
mod payload;
mod resource;
mod schema;
mod zero;

pub use access::{check_post_access, fill_null_and_force_send};
pub use conversion::convert;
pub use copier::{copy_structural, union_meta_fields};
pub use error::{AccessError, ConversionError, Error, MissingFieldEntry, Result};
pub use frozen::FrozenResource;
pub use identity::{parse_resource_url, ApiDomain, ResourceID, ResourceKey, Variant};
pub use payload::{Payload, PlaceholderData, VariantSlot};
pub use resource::Resource;
pub use schema::check_schema;
pub use zero::is_zero;
