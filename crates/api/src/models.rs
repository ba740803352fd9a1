use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use url::Url;

/// Identifier of a resource provider.
///
/// Providers appear and disappear at runtime; every indexed resource
/// carries the id of the provider that contributed it so the provider's
/// entries can be cleaned up when it goes away.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank id cannot be cleaned up later, so it is rejected at indexing time.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Description of one physical resource behind a lookup key.
///
/// Immutable once constructed. `last_modified` is carried for change
/// detection by consumers; the locator itself never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    location: Url,
    last_modified: SystemTime,
    provider: ProviderId,
}

impl ResourceInfo {
    pub fn new(location: Url, last_modified: SystemTime, provider: ProviderId) -> Self {
        Self {
            location,
            last_modified,
            provider,
        }
    }

    /// Opaque reference to the underlying bytes.
    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_display_and_blank() {
        let id = ProviderId::from("bundle-a");
        assert_eq!(id.to_string(), "bundle-a");
        assert!(!id.is_blank());
        assert!(ProviderId::from("   ").is_blank());
    }

    #[test]
    fn resource_info_serde_round_trip() {
        let info = ResourceInfo::new(
            Url::parse("file:///opt/bundles/a/META-INF/resources/css/style.css").unwrap(),
            SystemTime::UNIX_EPOCH,
            ProviderId::from("bundle-a"),
        );

        let json = serde_json::to_string(&info).unwrap();
        let back: ResourceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
        assert_eq!(back.provider().as_str(), "bundle-a");
    }
}
