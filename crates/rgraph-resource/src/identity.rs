//! Resource identity: `ResourceID`, `ResourceKey`, `Variant`, and `SelfLink`
//! formatting/parsing (spec §3 "Resource identity", §6 external interfaces).

use crate::error::{Error, Result};

/// The API version a payload is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Generally available, stable API surface.
    Ga,
    /// Alpha-only API surface.
    Alpha,
    /// Beta-only API surface.
    Beta,
}

impl Variant {
    /// The URL path segment this variant is addressed by.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Ga => "v1",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
        }
    }

    fn from_path_segment(segment: &str) -> Result<Self> {
        match segment {
            "v1" => Ok(Self::Ga),
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            other => Err(Error::UnknownVariant(other.to_string())),
        }
    }
}

/// How a resource is scoped: global, tied to a region, tied to a zone, or
/// unkeyed (collection-level resources with no instance name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKey {
    /// A globally scoped instance.
    Global(String),
    /// A region-scoped instance, `(name, region)`.
    Regional(String, String),
    /// A zone-scoped instance, `(name, zone)`.
    Zonal(String, String),
    /// No instance key (the resource kind itself, not an instance).
    None,
}

/// The API domain a `SelfLink` should be rendered against (spec §6: "emitting
/// selects based on configured API domain").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiDomain {
    /// `https://<service>.googleapis.com/...`
    #[default]
    Default,
    /// `https://www.googleapis.com/<service>/...`
    Legacy,
}

/// The fully qualified identity of a resource instance or collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceID {
    /// Owning project.
    pub project: String,
    /// The API group/service the resource belongs to (e.g. `compute`).
    pub api_group: String,
    /// The resource collection name (e.g. `backendServices`).
    pub resource: String,
    /// The instance key within that collection.
    pub key: ResourceKey,
}

impl ResourceID {
    /// Construct a new identity.
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        api_group: impl Into<String>,
        resource: impl Into<String>,
        key: ResourceKey,
    ) -> Self {
        Self { project: project.into(), api_group: api_group.into(), resource: resource.into(), key }
    }

    /// The instance name, if this identity is keyed.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.key {
            ResourceKey::Global(name) | ResourceKey::Regional(name, _) | ResourceKey::Zonal(name, _) => {
                Some(name.as_str())
            }
            ResourceKey::None => None,
        }
    }

    fn scope_segment(&self) -> String {
        match &self.key {
            ResourceKey::Global(_) | ResourceKey::None => "global".to_string(),
            ResourceKey::Regional(_, region) => format!("regions/{region}"),
            ResourceKey::Zonal(_, zone) => format!("zones/{zone}"),
        }
    }

    fn resource_and_name(&self) -> String {
        match self.name() {
            Some(name) => format!("{}/{}", self.resource, name),
            None => self.resource.clone(),
        }
    }

    /// Render the `SelfLink` for this identity at `variant`, under `domain`.
    #[must_use]
    pub fn self_link(&self, variant: Variant, domain: ApiDomain) -> String {
        match domain {
            ApiDomain::Default => format!(
                "https://{}.googleapis.com/{}/projects/{}/{}/{}",
                self.api_group,
                variant.path_segment(),
                self.project,
                self.scope_segment(),
                self.resource_and_name()
            ),
            ApiDomain::Legacy => format!(
                "https://www.googleapis.com/{}/{}/projects/{}/{}/{}",
                self.api_group,
                variant.path_segment(),
                self.project,
                self.scope_segment(),
                self.resource_and_name()
            ),
        }
    }
}

/// Parse a `SelfLink`-shaped resource URL, in either its per-service-host form
/// (`https://compute.googleapis.com/v1/...`) or its legacy form
/// (`https://www.googleapis.com/compute/v1/...`).
pub fn parse_resource_url(url: &str) -> Result<(ResourceID, Variant)> {
    let invalid = || Error::InvalidUrl(url.to_string());

    let rest = url.strip_prefix("https://").ok_or_else(invalid)?;
    let mut parts = rest.split('/');
    let host = parts.next().ok_or_else(invalid)?;

    let (api_group, version) = if host == "www.googleapis.com" {
        let service = parts.next().ok_or_else(invalid)?;
        let version = parts.next().ok_or_else(invalid)?;
        (service.to_string(), version)
    } else {
        let service = host.strip_suffix(".googleapis.com").ok_or_else(invalid)?;
        let version = parts.next().ok_or_else(invalid)?;
        (service.to_string(), version)
    };

    let variant = Variant::from_path_segment(version)?;

    if parts.next() != Some("projects") {
        return Err(invalid());
    }
    let project = parts.next().ok_or_else(invalid)?.to_string();

    let scope = parts.next().ok_or_else(invalid)?;
    let scoped_name = match scope {
        "global" => None,
        "regions" => {
            let region = parts.next().ok_or_else(invalid)?;
            Some(("region", region.to_string()))
        }
        "zones" => {
            let zone = parts.next().ok_or_else(invalid)?;
            Some(("zone", zone.to_string()))
        }
        _ => return Err(invalid()),
    };

    let resource = parts.next().ok_or_else(invalid)?.to_string();
    let name = parts.next().map(str::to_string);

    let key = match (scoped_name, name) {
        (None, Some(name)) => ResourceKey::Global(name),
        (None, None) => ResourceKey::None,
        (Some(("region", region)), Some(name)) => ResourceKey::Regional(name, region),
        (Some(("zone", zone)), Some(name)) => ResourceKey::Zonal(name, zone),
        _ => return Err(invalid()),
    };

    Ok((ResourceID { project, api_group, resource, key }, variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_zonal_self_link() {
        let id = ResourceID::new("my-proj", "compute", "instances", ResourceKey::Zonal("vm-1".into(), "us-central1-a".into()));
        let link = id.self_link(Variant::Beta, ApiDomain::Default);
        assert_eq!(link, "https://compute.googleapis.com/beta/projects/my-proj/zones/us-central1-a/instances/vm-1");
        let (parsed, variant) = parse_resource_url(&link).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(variant, Variant::Beta);
    }

    #[test]
    fn round_trips_a_global_self_link_through_the_legacy_host() {
        let id = ResourceID::new("my-proj", "compute", "networks", ResourceKey::Global("default".into()));
        let link = id.self_link(Variant::Ga, ApiDomain::Legacy);
        assert_eq!(link, "https://www.googleapis.com/compute/v1/projects/my-proj/global/networks/default");
        let (parsed, variant) = parse_resource_url(&link).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(variant, Variant::Ga);
    }

    #[test]
    fn rejects_an_unknown_variant_segment() {
        let err = parse_resource_url("https://compute.googleapis.com/v2/projects/p/global/networks/n").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(_)));
    }

    #[test]
    fn rejects_a_malformed_url() {
        let err = parse_resource_url("not-a-url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
