//! Contracts between the resource locator and its collaborators.
//!
//! This crate defines the traits the locator core is written against:
//! - [`ResourceProvider`] - a source of resources (the original design's
//!   "bundle"), enumerable on demand
//! - [`ResourceLocator`] - the lookup contract consumed by adapters
//! - [`ProviderObserver`] - the lifecycle-event subscription through which
//!   a discovery mechanism announces providers
//!
//! Concrete providers live alongside the traits: [`StaticProvider`] for
//! fixed in-memory resource sets and [`fs::DirectoryProvider`] for
//! filesystem trees.

use std::sync::Arc;
use std::time::SystemTime;
use url::Url;
use webres_api::{LocatorError, ProviderId, ResourceInfo, ResourceQuery};

pub mod fs;
pub use fs::DirectoryProvider;

/// Error type for provider operations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One resource declared by a provider: a logical path relative to the
/// resource root plus the physical location serving it.
#[derive(Debug, Clone)]
pub struct OfferedResource {
    pub relative_path: String,
    pub location: Url,
    pub last_modified: SystemTime,
}

impl OfferedResource {
    pub fn new(relative_path: impl Into<String>, location: Url, last_modified: SystemTime) -> Self {
        Self {
            relative_path: relative_path.into(),
            location,
            last_modified,
        }
    }
}

/// A source of resources that can appear and disappear at runtime.
pub trait ResourceProvider: Send + Sync {
    fn id(&self) -> &ProviderId;

    /// Enumerate the resources this provider currently offers.
    ///
    /// Enumeration itself may fail; the locator catches the failure at
    /// the registration boundary and treats it as an empty contribution.
    fn resources(&self) -> Result<Vec<OfferedResource>, BoxError>;
}

/// Lookup contract consumed by adapters (servlet handlers, test clients).
///
/// `locate_resource` and the `find_*` scans only ever see the currently
/// active entry per key; overridden entries stay invisible until the
/// overriding provider unregisters.
pub trait ResourceLocator: Send + Sync {
    /// Index every resource the provider offers. A provider that is
    /// already registered is ignored.
    fn register(&self, provider: &dyn ResourceProvider);

    /// Remove the provider's entries and restore any resources that were
    /// shadowed by them.
    fn unregister(&self, provider: &ProviderId);

    /// Exact-match lookup. Blank names are an invalid argument.
    fn locate_resource(&self, name: &str) -> Result<Option<ResourceInfo>, LocatorError>;

    /// All resources whose key contains the given path below the
    /// resource root.
    fn find_resources_in_path(&self, path: &str) -> Result<Vec<ResourceInfo>, LocatorError>;

    /// All resources whose key contains the given name in any segment.
    fn find_resources_matching_any_segment(
        &self,
        name: &str,
    ) -> Result<Vec<ResourceInfo>, LocatorError>;

    /// All resources whose key satisfies the query. Result order is
    /// unspecified.
    fn find_resources(&self, query: &ResourceQuery) -> Vec<ResourceInfo>;
}

/// Subscription contract for provider lifecycle events.
///
/// A discovery mechanism (module runtime, plugin host, test harness)
/// calls these from arbitrary threads; implementations must be safe to
/// invoke concurrently with lookups.
pub trait ProviderObserver: Send + Sync {
    /// The provider became available and should take part in lookups.
    fn on_provider_available(&self, provider: Arc<dyn ResourceProvider>);

    /// The provider went away; its resources must be cleaned.
    fn on_provider_unavailable(&self, provider: &ProviderId);
}

/// Provider with a fixed, in-memory resource set.
pub struct StaticProvider {
    id: ProviderId,
    resources: Vec<OfferedResource>,
}

impl StaticProvider {
    pub fn new(id: impl Into<ProviderId>) -> Self {
        Self {
            id: id.into(),
            resources: Vec::new(),
        }
    }

    pub fn with_resource(
        mut self,
        relative_path: impl Into<String>,
        location: Url,
        last_modified: SystemTime,
    ) -> Self {
        self.resources
            .push(OfferedResource::new(relative_path, location, last_modified));
        self
    }
}

impl ResourceProvider for StaticProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn resources(&self) -> Result<Vec<OfferedResource>, BoxError> {
        Ok(self.resources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_offers_its_resources() {
        let provider = StaticProvider::new("bundle-a").with_resource(
            "css/style.css",
            Url::parse("file:///tmp/a/css/style.css").unwrap(),
            SystemTime::UNIX_EPOCH,
        );

        assert_eq!(provider.id().as_str(), "bundle-a");
        let offered = provider.resources().unwrap();
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].relative_path, "css/style.css");
    }
}
