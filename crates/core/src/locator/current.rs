//! Narrow accessor for the currently installed locator.
//!
//! Adapters hold a `LocatorSlot` by explicit injection and acquire the
//! locator per operation; the lease releases its reference on drop, on
//! every exit path.

use std::ops::Deref;
use std::sync::{Arc, RwLock};
use webres_provider::ResourceLocator;

/// Holds the locator an adapter should use for its next operation.
///
/// The slot is an explicitly shared value, not a process-wide global;
/// whoever wires the system together decides which components see it.
#[derive(Default)]
pub struct LocatorSlot {
    current: RwLock<Option<Arc<dyn ResourceLocator>>>,
}

impl LocatorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, locator: Arc<dyn ResourceLocator>) {
        *self.current.write().unwrap() = Some(locator);
    }

    pub fn clear(&self) {
        *self.current.write().unwrap() = None;
    }

    /// Acquire the current locator for the duration of one operation.
    /// Returns `None` when no locator is installed.
    pub fn acquire(&self) -> Option<LocatorLease> {
        self.current
            .read()
            .unwrap()
            .clone()
            .map(|locator| LocatorLease { locator })
    }
}

/// Scoped handle on the locator acquired from a [`LocatorSlot`].
pub struct LocatorLease {
    locator: Arc<dyn ResourceLocator>,
}

impl Deref for LocatorLease {
    type Target = dyn ResourceLocator;

    fn deref(&self) -> &Self::Target {
        self.locator.as_ref()
    }
}
