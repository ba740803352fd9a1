//! Concurrency-safe façade around [`ResourceIndex`].
//!
//! The only component external collaborators talk to: providers are fed
//! in through [`ResourceLocator::register`]/`unregister`, adapters read
//! through `locate_resource` and the `find_*` scans.

use crate::error::WebresError;
use crate::locator::index::{IndexStats, ResourceIndex, normalize_key};
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{debug, error, info, warn};
use webres_api::{LocatorError, ProviderId, ResourceInfo, ResourceQuery};
use webres_provider::{ResourceLocator, ResourceProvider};

/// Namespace prefix under which every lookup key is rooted. Follows the
/// Servlet 3.0 convention for JAR resources.
pub const RESOURCE_ROOT: &str = "META-INF/resources/";

struct LocatorState {
    index: ResourceIndex,
    providers: HashSet<ProviderId>,
}

/// Thread-safe resource locator backed by an in-memory index.
///
/// A single read/write lock guards the index and the registered-provider
/// set: lookups proceed in parallel, registrations are exclusive and
/// become visible atomically. Once `register` returns, every lookup that
/// starts afterwards observes the provider's resources until a
/// conflicting registration or the provider's own unregistration.
pub struct IndexedResourceLocator {
    state: RwLock<LocatorState>,
    resource_root: String,
}

impl IndexedResourceLocator {
    pub fn new() -> Self {
        Self::with_resource_root(RESOURCE_ROOT)
    }

    /// Create with a different root namespace (mainly for tests).
    pub fn with_resource_root(root: &str) -> Self {
        let mut resource_root = normalize_key(root).to_string();
        if !resource_root.is_empty() && !resource_root.ends_with('/') {
            resource_root.push('/');
        }
        Self {
            state: RwLock::new(LocatorState {
                index: ResourceIndex::new(),
                providers: HashSet::new(),
            }),
            resource_root,
        }
    }

    fn rooted_key(&self, path: &str) -> String {
        format!("{}{}", self.resource_root, normalize_key(path))
    }

    pub fn stats(&self) -> IndexStats {
        self.state.read().unwrap().index.stats()
    }

    pub fn is_registered(&self, provider: &ProviderId) -> bool {
        self.state.read().unwrap().providers.contains(provider)
    }

    pub fn registered_providers(&self) -> Vec<ProviderId> {
        self.state.read().unwrap().providers.iter().cloned().collect()
    }

    /// Locate a resource and read its bytes.
    ///
    /// The index entry is only guaranteed valid at lookup time - the
    /// provider may vanish before the read. Consumers should treat a
    /// read failure after a successful lookup as not-found.
    pub fn read_resource(&self, name: &str) -> crate::Result<Option<Vec<u8>>> {
        let Some(info) = self.locate_resource(name)? else {
            return Ok(None);
        };
        let path = info.location().to_file_path().map_err(|_| {
            WebresError::Internal(format!(
                "location '{}' is not a local file",
                info.location()
            ))
        })?;
        Ok(Some(std::fs::read(path)?))
    }
}

impl Default for IndexedResourceLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLocator for IndexedResourceLocator {
    fn register(&self, provider: &dyn ResourceProvider) {
        // Enumerate outside the lock so a slow provider never blocks readers.
        let offered = match provider.resources() {
            Ok(offered) => offered,
            Err(err) => {
                error!(
                    "Error retrieving resources from provider '{}': {}",
                    provider.id(),
                    err
                );
                Vec::new()
            }
        };

        let count = offered.len();
        {
            let mut state = self.state.write().unwrap();
            if !state.providers.insert(provider.id().clone()) {
                warn!(
                    "Provider '{}' is already registered; ignoring duplicate registration",
                    provider.id()
                );
                return;
            }
            for resource in offered {
                let key = self.rooted_key(&resource.relative_path);
                let info = ResourceInfo::new(
                    resource.location,
                    resource.last_modified,
                    provider.id().clone(),
                );
                state.index.add_resource(&key, info);
            }
        }

        info!(
            "Provider '{}' scanned for resources under '{}': {} entries added to index",
            provider.id(),
            self.resource_root,
            count
        );
    }

    fn unregister(&self, provider: &ProviderId) {
        let mut state = self.state.write().unwrap();
        if !state.providers.remove(provider) {
            debug!("Provider '{}' was not registered; nothing to clean", provider);
            return;
        }
        state.index.clean_provider(provider);
    }

    fn locate_resource(&self, name: &str) -> Result<Option<ResourceInfo>, LocatorError> {
        if name.trim().is_empty() {
            return Err(LocatorError::InvalidArgument(
                "locate_resource requires a non-blank resource name".to_string(),
            ));
        }
        let key = self.rooted_key(name);
        let state = self.state.read().unwrap();
        Ok(state.index.resource_info(&key).cloned())
    }

    fn find_resources_in_path(&self, path: &str) -> Result<Vec<ResourceInfo>, LocatorError> {
        if path.trim().is_empty() {
            return Err(LocatorError::InvalidArgument(
                "find_resources_in_path requires a non-blank path".to_string(),
            ));
        }
        let needle = self.rooted_key(path);
        let state = self.state.read().unwrap();
        Ok(state.index.find_resources(|key| key.contains(&needle)))
    }

    fn find_resources_matching_any_segment(
        &self,
        name: &str,
    ) -> Result<Vec<ResourceInfo>, LocatorError> {
        if name.trim().is_empty() {
            return Err(LocatorError::InvalidArgument(
                "find_resources_matching_any_segment requires a non-blank name".to_string(),
            ));
        }
        let needle = normalize_key(name).to_string();
        let state = self.state.read().unwrap();
        Ok(state.index.find_resources(|key| key.contains(&needle)))
    }

    fn find_resources(&self, query: &ResourceQuery) -> Vec<ResourceInfo> {
        self.state.read().unwrap().index.find_by_query(query)
    }
}
