//! Fan-out point between provider discovery and locator services.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};
use webres_api::ProviderId;
use webres_provider::{ProviderObserver, ResourceLocator, ResourceProvider};

struct TrackerState {
    locators: Vec<Arc<dyn ResourceLocator>>,
    providers: HashMap<ProviderId, Arc<dyn ResourceProvider>>,
}

/// Dispatches provider lifecycle events to attached locators.
///
/// The tracker remembers every available provider, so a locator attached
/// after providers have already appeared receives a full scan of the
/// current provider set.
pub struct ProviderTracker {
    state: RwLock<TrackerState>,
}

impl ProviderTracker {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TrackerState {
                locators: Vec::new(),
                providers: HashMap::new(),
            }),
        }
    }

    /// Attach a locator, registering every currently known provider with
    /// it before it starts receiving events.
    pub fn attach_locator(&self, locator: Arc<dyn ResourceLocator>) {
        let mut state = self.state.write().unwrap();
        info!(
            "Resource locator attached; scanning {} known providers",
            state.providers.len()
        );
        for provider in state.providers.values() {
            locator.register(provider.as_ref());
        }
        state.locators.push(locator);
    }

    /// Detach a previously attached locator. Its index is left as-is.
    pub fn detach_locator(&self, locator: &Arc<dyn ResourceLocator>) {
        let mut state = self.state.write().unwrap();
        state.locators.retain(|known| !Arc::ptr_eq(known, locator));
        info!("Resource locator detached; {} remaining", state.locators.len());
    }

    pub fn provider_count(&self) -> usize {
        self.state.read().unwrap().providers.len()
    }

    pub fn locator_count(&self) -> usize {
        self.state.read().unwrap().locators.len()
    }
}

impl Default for ProviderTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderObserver for ProviderTracker {
    fn on_provider_available(&self, provider: Arc<dyn ResourceProvider>) {
        let mut state = self.state.write().unwrap();
        if state.providers.contains_key(provider.id()) {
            debug!("Provider '{}' is already tracked", provider.id());
            return;
        }
        for locator in &state.locators {
            locator.register(provider.as_ref());
        }
        state.providers.insert(provider.id().clone(), provider);
    }

    fn on_provider_unavailable(&self, provider: &ProviderId) {
        let mut state = self.state.write().unwrap();
        if state.providers.remove(provider).is_none() {
            debug!("Provider '{}' was not tracked", provider);
            return;
        }
        for locator in &state.locators {
            locator.unregister(provider);
        }
    }
}
