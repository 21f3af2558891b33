//! Registry mapping type names to schemas and lifecycle handlers.

use std::collections::BTreeMap;
use std::fmt;

use futures::future::BoxFuture;
use serde::Serialize;

use crate::schema::Schema;
use crate::{
    Diagnostics, Error, HandlerContext, ResourceData, TRACING_TARGET_REGISTRY, data_source,
    resource,
};

/// Lifecycle handler: mutates the state in place or returns diagnostics.
pub type HandlerFn =
    for<'a> fn(&'a HandlerContext, &'a mut ResourceData) -> BoxFuture<'a, Result<(), Diagnostics>>;

/// Schema and handlers of a managed resource type.
#[derive(Clone)]
pub struct ResourceType {
    /// Type name, e.g. `sparkpost_webhook`.
    pub name: &'static str,
    /// Attribute declarations.
    pub schema: Schema,
    /// Refreshes state from the remote object identified by the local id.
    pub read: HandlerFn,
    /// Creates the remote object from the configured attributes.
    pub create: HandlerFn,
    /// Replaces the remote object's mutable fields.
    pub update: HandlerFn,
    /// Deletes the remote object and detaches the state.
    pub delete: HandlerFn,
    /// Populates state from an externally known id.
    pub import: HandlerFn,
}

impl ResourceType {
    /// Runs the read handler.
    pub async fn read(
        &self,
        ctx: &HandlerContext,
        data: &mut ResourceData,
    ) -> Result<(), Diagnostics> {
        (self.read)(ctx, data).await
    }

    /// Validates the state against the schema, then runs the create handler.
    pub async fn create(
        &self,
        ctx: &HandlerContext,
        data: &mut ResourceData,
    ) -> Result<(), Diagnostics> {
        self.schema.validate(data).into_result()?;
        (self.create)(ctx, data).await
    }

    /// Validates the state against the schema, then runs the update handler.
    pub async fn update(
        &self,
        ctx: &HandlerContext,
        data: &mut ResourceData,
    ) -> Result<(), Diagnostics> {
        self.schema.validate(data).into_result()?;
        (self.update)(ctx, data).await
    }

    /// Runs the delete handler.
    pub async fn delete(
        &self,
        ctx: &HandlerContext,
        data: &mut ResourceData,
    ) -> Result<(), Diagnostics> {
        (self.delete)(ctx, data).await
    }

    /// Builds state for an externally known id through the import handler.
    pub async fn import(
        &self,
        ctx: &HandlerContext,
        id: &str,
    ) -> Result<ResourceData, Diagnostics> {
        let mut data = ResourceData::with_id(id);
        (self.import)(ctx, &mut data).await?;
        Ok(data)
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Schema and read handler of a read-only data source.
#[derive(Clone)]
pub struct DataSourceType {
    /// Type name.
    pub name: &'static str,
    /// Attribute declarations.
    pub schema: Schema,
    /// Looks up the remote object and populates the state.
    pub read: HandlerFn,
}

impl DataSourceType {
    /// Validates the lookup arguments, then runs the read handler.
    pub async fn read(
        &self,
        ctx: &HandlerContext,
        data: &mut ResourceData,
    ) -> Result<(), Diagnostics> {
        self.schema.validate(data).into_result()?;
        (self.read)(ctx, data).await
    }
}

impl fmt::Debug for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceType")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Serialisable view of every schema in a registry.
#[derive(Debug, Serialize)]
pub struct ProviderSchema<'a> {
    /// Resource schemas by type name.
    pub resources: BTreeMap<&'static str, &'a Schema>,
    /// Data source schemas by type name.
    pub data_sources: BTreeMap<&'static str, &'a Schema>,
}

/// Explicit mapping from type name to schema and handlers.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    resources: BTreeMap<&'static str, ResourceType>,
    data_sources: BTreeMap<&'static str, DataSourceType>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registry with every built-in SparkPost type.
    pub fn sparkpost() -> Self {
        let mut registry = Self::new();
        registry.register_resource(resource::webhook::resource_type());
        registry.register_data_source(data_source::webhook::data_source_type());

        tracing::debug!(
            target: TRACING_TARGET_REGISTRY,
            resources = registry.resources.len(),
            data_sources = registry.data_sources.len(),
            "Registry initialized"
        );

        registry
    }

    /// Registers a resource type, replacing any previous one with the same name.
    pub fn register_resource(&mut self, resource: ResourceType) {
        self.resources.insert(resource.name, resource);
    }

    /// Registers a data source, replacing any previous one with the same name.
    pub fn register_data_source(&mut self, data_source: DataSourceType) {
        self.data_sources.insert(data_source.name, data_source);
    }

    /// Looks up a resource type by name.
    pub fn resource(&self, name: &str) -> Result<&ResourceType, Diagnostics> {
        self.resources.get(name).ok_or_else(|| {
            Error::configuration(format!("unknown resource type '{name}'")).into()
        })
    }

    /// Looks up a data source by name.
    pub fn data_source(&self, name: &str) -> Result<&DataSourceType, Diagnostics> {
        self.data_sources.get(name).ok_or_else(|| {
            Error::configuration(format!("unknown data source '{name}'")).into()
        })
    }

    /// Returns the names of all resource types.
    pub fn resource_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    /// Returns the names of all data sources.
    pub fn data_source_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    /// Returns a serialisable view of every schema.
    pub fn schema(&self) -> ProviderSchema<'_> {
        ProviderSchema {
            resources: self.resources.iter().map(|(k, v)| (*k, &v.schema)).collect(),
            data_sources: self.data_sources.iter().map(|(k, v)| (*k, &v.schema)).collect(),
        }
    }
}
