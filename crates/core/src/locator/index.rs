//! Pure bookkeeping of lookup-key → resource mappings with override history.
//!
//! Not thread-safe by itself; `IndexedResourceLocator` wraps it in a
//! read/write lock.

use std::collections::HashMap;
use tracing::{debug, info, warn};
use webres_api::{ProviderId, ResourceInfo, ResourceQuery};

/// Strip a single leading '/' - "/a/b" and "a/b" address the same resource.
pub(crate) fn normalize_key(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// One indexed resource: the lookup key it serves plus its current info.
#[derive(Debug, Clone)]
struct IndexEntry {
    lookup_key: String,
    info: ResourceInfo,
}

/// Mapping from lookup key to the resource that currently serves it.
///
/// Keys are unique in the active map. When a second provider contributes
/// an already-taken key, the displaced entry moves to a per-key shadow
/// stack and is promoted back once the overriding provider unregisters
/// (last in, first out).
#[derive(Debug, Default)]
pub struct ResourceIndex {
    /// Currently visible entry per key
    active: HashMap<String, IndexEntry>,
    /// Displaced entries per key, oldest first
    shadowed: HashMap<String, Vec<IndexEntry>>,
}

/// Index counters, for logging and tests
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub active: usize,
    pub shadowed: usize,
    pub by_provider: HashMap<String, usize>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial capacity for the active map
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            active: HashMap::with_capacity(capacity),
            shadowed: HashMap::new(),
        }
    }

    /// Install `info` as the active entry for `key`.
    ///
    /// An entry already active under a *different* provider is pushed
    /// onto the key's shadow stack; an entry from the same provider is
    /// replaced in place, so a shadow entry's provider always differs
    /// from the active one. Blank keys and blank provider ids are
    /// dropped silently.
    pub fn add_resource(&mut self, key: &str, info: ResourceInfo) {
        if key.trim().is_empty() || info.provider().is_blank() {
            return;
        }
        let key = normalize_key(key);

        if let Some(current) = self.active.get_mut(key) {
            if current.info.provider() == info.provider() {
                debug!(
                    "Provider '{}' replaced its own entry for '{}'",
                    info.provider(),
                    key
                );
                current.info = info;
            } else {
                warn!(
                    "Resource with path '{}' is already provided by '{}'! Will be overridden by '{}'",
                    key,
                    current.info.provider(),
                    info.provider()
                );
                let displaced = std::mem::replace(
                    current,
                    IndexEntry {
                        lookup_key: key.to_string(),
                        info,
                    },
                );
                self.shadowed
                    .entry(key.to_string())
                    .or_default()
                    .push(displaced);
            }
            return;
        }

        self.active.insert(
            key.to_string(),
            IndexEntry {
                lookup_key: key.to_string(),
                info,
            },
        );
    }

    /// Exact-match lookup against the active map only; shadowed entries
    /// stay invisible.
    pub fn resource_info(&self, key: &str) -> Option<&ResourceInfo> {
        self.active.get(normalize_key(key)).map(|entry| &entry.info)
    }

    /// Linear scan of active keys. Result order is unspecified.
    pub fn find_resources<F>(&self, pred: F) -> Vec<ResourceInfo>
    where
        F: Fn(&str) -> bool,
    {
        self.active
            .iter()
            .filter(|(key, _)| pred(key))
            .map(|(_, entry)| entry.info.clone())
            .collect()
    }

    pub fn find_by_query(&self, query: &ResourceQuery) -> Vec<ResourceInfo> {
        self.find_resources(|key| query.matches(key))
    }

    /// Remove every entry contributed by `provider` and promote the most
    /// recently shadowed survivor of each vacated key.
    ///
    /// Returns the number of active entries removed.
    pub fn clean_provider(&mut self, provider: &ProviderId) -> usize {
        // Collect first - the maps must not be mutated while iterating.
        let vacated: Vec<String> = self
            .active
            .iter()
            .filter(|(_, entry)| entry.info.provider() == provider)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &vacated {
            self.active.remove(key);
        }

        // The provider's shadowed entries disappear with it.
        self.shadowed.retain(|_, stack| {
            stack.retain(|entry| entry.info.provider() != provider);
            !stack.is_empty()
        });

        // LIFO restoration for every key the provider had claimed.
        for key in &vacated {
            if let Some(mut stack) = self.shadowed.remove(key) {
                if let Some(entry) = stack.pop() {
                    info!(
                        "Restoring shadowed resource '{}' from provider '{}'",
                        key,
                        entry.info.provider()
                    );
                    self.active.insert(entry.lookup_key.clone(), entry);
                }
                if !stack.is_empty() {
                    self.shadowed.insert(key.clone(), stack);
                }
            }
        }

        if !vacated.is_empty() {
            info!(
                "Removed {} active entries from provider '{}'",
                vacated.len(),
                provider
            );
        }
        vacated.len()
    }

    /// Number of active entries
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        let mut by_provider: HashMap<String, usize> = HashMap::new();
        for entry in self.active.values() {
            *by_provider
                .entry(entry.info.provider().to_string())
                .or_default() += 1;
        }

        IndexStats {
            active: self.active.len(),
            shadowed: self.shadowed.values().map(Vec::len).sum(),
            by_provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;
    use url::Url;

    fn make_info(location: &str, provider: &str) -> ResourceInfo {
        ResourceInfo::new(
            Url::parse(&format!("file:///bundles/{location}")).unwrap(),
            SystemTime::UNIX_EPOCH,
            ProviderId::from(provider),
        )
    }

    #[test]
    fn add_and_lookup() {
        let mut index = ResourceIndex::new();
        index.add_resource("images/a.png", make_info("p1/images/a.png", "p1"));

        let info = index.resource_info("images/a.png");
        assert!(info.is_some());
        assert_eq!(info.unwrap().provider().as_str(), "p1");
        assert!(index.resource_info("images/b.png").is_none());
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut index = ResourceIndex::new();
        index.add_resource("  ", make_info("p1/a", "p1"));
        index.add_resource("a", make_info("p1/a", "   "));
        assert!(index.is_empty());
    }

    #[test]
    fn leading_slash_is_normalized() {
        let mut index = ResourceIndex::new();
        index.add_resource("/a/b", make_info("p1/a/b", "p1"));

        assert!(index.resource_info("a/b").is_some());
        assert!(index.resource_info("/a/b").is_some());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn override_shadows_previous_entry() {
        let mut index = ResourceIndex::new();
        index.add_resource("k", make_info("p1/k", "p1"));
        index.add_resource("k", make_info("p2/k", "p2"));

        assert_eq!(index.resource_info("k").unwrap().provider().as_str(), "p2");
        let stats = index.stats();
        assert_eq!(stats.active, 1);
        assert_eq!(stats.shadowed, 1);
    }

    #[test]
    fn same_provider_replaces_in_place() {
        let mut index = ResourceIndex::new();
        index.add_resource("k", make_info("p1/old", "p1"));
        index.add_resource("k", make_info("p1/new", "p1"));

        let info = index.resource_info("k").unwrap();
        assert!(info.location().path().ends_with("p1/new"));
        // No self-shadowing: a same-provider re-offer never stacks.
        assert_eq!(index.stats().shadowed, 0);
    }

    #[test]
    fn unregister_restores_lifo_order() {
        let mut index = ResourceIndex::new();
        index.add_resource("k", make_info("a/k", "a"));
        index.add_resource("k", make_info("b/k", "b"));
        index.add_resource("k", make_info("c/k", "c"));

        assert_eq!(index.resource_info("k").unwrap().provider().as_str(), "c");

        index.clean_provider(&ProviderId::from("c"));
        assert_eq!(index.resource_info("k").unwrap().provider().as_str(), "b");

        index.clean_provider(&ProviderId::from("b"));
        assert_eq!(index.resource_info("k").unwrap().provider().as_str(), "a");

        index.clean_provider(&ProviderId::from("a"));
        assert!(index.resource_info("k").is_none());
        assert_eq!(index.stats(), IndexStats::default());
    }

    #[test]
    fn removing_a_shadowed_provider_skips_it_on_restore() {
        let mut index = ResourceIndex::new();
        index.add_resource("k", make_info("a/k", "a"));
        index.add_resource("k", make_info("b/k", "b"));
        index.add_resource("k", make_info("c/k", "c"));

        // 'b' leaves while shadowed; its entry must not come back.
        index.clean_provider(&ProviderId::from("b"));
        assert_eq!(index.resource_info("k").unwrap().provider().as_str(), "c");

        index.clean_provider(&ProviderId::from("c"));
        assert_eq!(index.resource_info("k").unwrap().provider().as_str(), "a");
    }

    #[test]
    fn providers_with_distinct_keys_are_independent() {
        let mut index = ResourceIndex::new();
        index.add_resource("a/x", make_info("p1/x", "p1"));
        index.add_resource("b/y", make_info("p2/y", "p2"));

        index.clean_provider(&ProviderId::from("p1"));

        assert!(index.resource_info("a/x").is_none());
        assert_eq!(
            index.resource_info("b/y").unwrap().provider().as_str(),
            "p2"
        );
    }

    #[test]
    fn clean_unknown_provider_is_a_noop() {
        let mut index = ResourceIndex::new();
        index.add_resource("k", make_info("p1/k", "p1"));

        assert_eq!(index.clean_provider(&ProviderId::from("ghost")), 0);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn find_resources_scans_active_keys_only() {
        let mut index = ResourceIndex::new();
        index.add_resource("css/style.css", make_info("p1/style", "p1"));
        index.add_resource("js/app.js", make_info("p1/app", "p1"));
        // Shadowed entry with a matching key must not be returned.
        index.add_resource("css/style.css", make_info("p2/style", "p2"));

        let found = index.find_resources(|key| key.contains("css"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].provider().as_str(), "p2");
    }

    #[test]
    fn find_by_query_applies_all_constraints() {
        let mut index = ResourceIndex::new();
        index.add_resource("css/style.css", make_info("p1/style", "p1"));
        index.add_resource("css/print.css", make_info("p1/print", "p1"));
        index.add_resource("js/style.js", make_info("p1/js", "p1"));

        let query = ResourceQuery::new().starts_with("css").ends_with(".css");
        assert_eq!(index.find_by_query(&query).len(), 2);

        let query = ResourceQuery::new().with_segment("style");
        assert_eq!(index.find_by_query(&query).len(), 2);
    }

    #[test]
    fn stats_count_by_provider() {
        let mut index = ResourceIndex::new();
        index.add_resource("a", make_info("p1/a", "p1"));
        index.add_resource("b", make_info("p1/b", "p1"));
        index.add_resource("c", make_info("p2/c", "p2"));

        let stats = index.stats();
        assert_eq!(stats.active, 3);
        assert_eq!(stats.by_provider.get("p1"), Some(&2));
        assert_eq!(stats.by_provider.get("p2"), Some(&1));
    }
}
