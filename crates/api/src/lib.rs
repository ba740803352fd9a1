pub mod error;
pub mod models;
pub mod query;

// Re-export commonly used types
pub use error::LocatorError;
pub use models::{ProviderId, ResourceInfo};
pub use query::ResourceQuery;
