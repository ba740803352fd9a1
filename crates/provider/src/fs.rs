//! Filesystem-backed resource provider.
//!
//! Walks a directory tree and offers every file below the provider's
//! resource directory, keyed by its path relative to that directory.

use crate::{BoxError, OfferedResource, ResourceProvider};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;
use url::Url;
use walkdir::WalkDir;
use webres_api::ProviderId;

/// Subdirectory scanned for servable resources, following the Servlet
/// 3.0 convention for JAR resources.
pub const DEFAULT_RESOURCE_DIR: &str = "META-INF/resources";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot express '{0}' as a file URL")]
    Url(PathBuf),
}

/// Provider that serves the files under `root/META-INF/resources/`.
///
/// A root without that subdirectory is a valid provider offering zero
/// resources.
pub struct DirectoryProvider {
    id: ProviderId,
    root: PathBuf,
    resource_dir: String,
}

impl DirectoryProvider {
    pub fn new(id: impl Into<ProviderId>, root: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            resource_dir: DEFAULT_RESOURCE_DIR.to_string(),
        }
    }

    /// Override the subdirectory scanned below the root.
    pub fn with_resource_dir(mut self, resource_dir: impl Into<String>) -> Self {
        self.resource_dir = resource_dir.into();
        self
    }

    fn scan(&self) -> Result<Vec<OfferedResource>, ScanError> {
        let base = self.root.join(&self.resource_dir);
        if !base.is_dir() {
            debug!(
                "Provider '{}' has no '{}' directory; offering nothing",
                self.id, self.resource_dir
            );
            return Ok(Vec::new());
        }

        let mut offered = Vec::new();
        for entry in WalkDir::new(&base) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            let location = Url::from_file_path(entry.path())
                .map_err(|_| ScanError::Url(entry.path().to_path_buf()))?;
            let last_modified = entry
                .metadata()?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);
            offered.push(OfferedResource::new(
                relative_lookup_path(relative),
                location,
                last_modified,
            ));
        }
        Ok(offered)
    }
}

/// Join path components with '/' so keys are platform-independent.
fn relative_lookup_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl ResourceProvider for DirectoryProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn resources(&self) -> Result<Vec<OfferedResource>, BoxError> {
        self.scan().map_err(Into::into)
    }
}
