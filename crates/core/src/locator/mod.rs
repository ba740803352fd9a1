//! Indexed resource locator - maps logical resource paths to physical
//! locations contributed by dynamically appearing providers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────┐     ┌───────────────────────────┐
//! │  provider discovery     │────▶│   ProviderTracker         │
//! │  (ProviderObserver)     │     │   (event fan-out)         │
//! └─────────────────────────┘     └───────────┬───────────────┘
//!                                             │ register/unregister
//!                                             ▼
//!                                 ┌───────────────────────────┐
//!                                 │  IndexedResourceLocator   │
//!                                 │  (RwLock façade)          │
//!                                 └───────────┬───────────────┘
//!                                             │
//!                                             ▼
//!                                 ┌───────────────────────────┐
//!                                 │  ResourceIndex            │
//!                                 │  (active map + shadows)   │
//!                                 └───────────────────────────┘
//! ```
//!
//! When two providers contribute the same lookup key, the later
//! registration wins and the earlier entry is shadowed; unregistering
//! the winner restores the most recently shadowed entry (LIFO).

pub mod current;
pub mod index;
pub mod service;
pub mod tracker;

pub use current::{LocatorLease, LocatorSlot};
pub use index::{IndexStats, ResourceIndex};
pub use service::{IndexedResourceLocator, RESOURCE_ROOT};
pub use tracker::ProviderTracker;
