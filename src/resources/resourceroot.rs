//! Resource root configuration.
//!
//! Every asset file the engine loads is addressed relative to a configurable
//! root made of two parts: a *host* prefix (an absolute directory, a mount
//! point, or a URL-shaped prefix) and a *directory* segment appended between
//! the host and the file name. [`ResourceRoot::url_of`] joins the three into
//! the final location handed to the loader; it fails when either part has
//! not been configured yet.
//!
//! Asset keys follow a single casing convention across textures, sheets,
//! skeletons and audio: the file stem, ASCII-lowercased. See
//! [`ResourceRoot::asset_key`].

use bevy_ecs::prelude::Resource;
use thiserror::Error;

/// Errors produced while resolving an asset location.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The host prefix was never configured.
    #[error("resource host not set")]
    HostNotSet,

    /// The directory segment was never configured.
    #[error("resource directory not set")]
    DirectoryNotSet,
}

/// Configurable base location for asset resolution.
///
/// Insert one instance into the world before any manifest is processed.
/// Both parts start unset; [`ResourceRoot::url_of`] rejects resolution until
/// they are provided.
#[derive(Resource, Debug, Clone, Default)]
pub struct ResourceRoot {
    host: Option<String>,
    directory: Option<String>,
}

impl ResourceRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ResourceRoot::set_host`].
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.set_host(host);
        self
    }

    /// Builder form of [`ResourceRoot::set_directory`].
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.set_directory(directory);
        self
    }

    /// Set the host prefix. Trailing slashes are trimmed so joining never
    /// doubles separators. An empty (or all-slash) value leaves the host
    /// unset.
    pub fn set_host(&mut self, host: impl Into<String>) {
        let host = host.into();
        let trimmed = host.trim_end_matches('/');
        self.host = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Set the directory segment. Surrounding slashes are trimmed. An empty
    /// value leaves the directory unset.
    pub fn set_directory(&mut self, directory: impl Into<String>) {
        let directory = directory.into();
        let trimmed = directory.trim_matches('/');
        self.directory = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// Join host, directory and file into the final asset location.
    ///
    /// No I/O and no encoding happens here; the result is a plain string
    /// handed to the loader as-is.
    pub fn url_of(&self, file: &str) -> Result<String, ResolveError> {
        let host = self.host.as_deref().ok_or(ResolveError::HostNotSet)?;
        let directory = self
            .directory
            .as_deref()
            .ok_or(ResolveError::DirectoryNotSet)?;
        let file = file.trim_start_matches('/');
        Ok(format!("{}/{}/{}", host, directory, file))
    }

    /// Derive the store key for a file name: strip any leading directories
    /// and the extension, then ASCII-lowercase the stem.
    ///
    /// `"ui/Boss_Fight.XM"` becomes `"boss_fight"`.
    pub fn asset_key(file: &str) -> String {
        let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let stem = match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        };
        stem.to_ascii_lowercase()
    }
}
