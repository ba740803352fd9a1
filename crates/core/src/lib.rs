pub mod error;
pub mod locator;
pub mod logging;

pub use error::{Result, WebresError};
pub use locator::{IndexedResourceLocator, LocatorSlot, ProviderTracker, ResourceIndex};
