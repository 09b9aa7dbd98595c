//! Cross-resource references derived from `SelfLink`-valued fields.

use rgraph_path::Path;
use rgraph_resource::ResourceID;

/// A directed reference from one resource to another, discovered at the
/// field `path` that held the target's `SelfLink` (spec §3, §4.3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// The referencing node.
    pub from: ResourceID,
    /// The referenced node.
    pub to: ResourceID,
    /// Where in `from`'s resource the reference was found.
    pub path: Path,
}
