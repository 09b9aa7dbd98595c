//! The per-resource-kind adapter registry that lets a generic transitive
//! closure pass drive a [`rgraph_cloud::CloudClient`] (which speaks plain
//! JSON, spec §6) through the typed [`rgraph_resource::Resource`] model,
//! without the closure pass itself knowing any concrete payload type.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use rgraph_cloud::{CloudClient, CloudError, Context};
use rgraph_graph::ErasedResource;
use rgraph_resource::{Payload, Resource, ResourceID, Variant};

/// Bridges one resource kind's `CloudClient::get` call to an erased, frozen
/// resource attached to a graph node.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    /// Fetch `id`'s GA payload and freeze it into an [`ErasedResource`].
    /// Returns `Ok(None)` on a not-found cloud response (spec §4.5: "a
    /// not-found result sets state to `DoesNotExist` rather than erroring").
    async fn fetch(
        &self,
        ctx: &Context,
        client: &dyn CloudClient,
        id: &ResourceID,
    ) -> std::result::Result<Option<Arc<dyn ErasedResource>>, String>;
}

/// A [`ResourceAdapter`] for any `Resource<G, A, B>` triple, parameterized
/// purely by type — registering one is a zero-sized, zero-logic declaration
/// of "this resource kind's GA/Alpha/Beta payload types are these".
pub struct TypedAdapter<G, A, B> {
    _marker: PhantomData<fn() -> (G, A, B)>,
}

impl<G, A, B> Default for TypedAdapter<G, A, B> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<G, A, B> TypedAdapter<G, A, B> {
    /// A new adapter for this payload triple.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<G: Payload, A: Payload, B: Payload> ResourceAdapter for TypedAdapter<G, A, B> {
    async fn fetch(
        &self,
        ctx: &Context,
        client: &dyn CloudClient,
        id: &ResourceID,
    ) -> std::result::Result<Option<Arc<dyn ErasedResource>>, String> {
        let value = match client.get(ctx, id, Variant::Ga).await {
            Ok(value) => value,
            Err(CloudError::NotFound) => return Ok(None),
            Err(err) => return Err(err.to_string()),
        };
        let ga: G = serde_json::from_value(value).map_err(|e| e.to_string())?;
        let frozen = Resource::<G, A, B>::new(id.clone(), ga).and_then(Resource::freeze).map_err(|e| e.to_string())?;
        Ok(Some(Arc::new(frozen)))
    }
}

/// Maps a resource collection name (`ResourceID::resource`, e.g.
/// `"backendServices"`) to the adapter that knows how to fetch and freeze
/// it.
#[derive(Default)]
pub struct Registry {
    adapters: HashMap<String, Arc<dyn ResourceAdapter>>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the adapter for `resource_kind`, builder-style.
    #[must_use]
    pub fn with(mut self, resource_kind: impl Into<String>, adapter: Arc<dyn ResourceAdapter>) -> Self {
        self.adapters.insert(resource_kind.into(), adapter);
        self
    }

    /// Look up the adapter for a resource kind.
    #[must_use]
    pub fn get(&self, resource_kind: &str) -> Option<&Arc<dyn ResourceAdapter>> {
        self.adapters.get(resource_kind)
    }
}
