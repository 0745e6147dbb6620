// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw file resolver node with an optional mount hook.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{MountHook, Resolver};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolver node that answers with the whole contents of a file.
///
/// The key is ignored: a `FileSource` answers every key it is asked for with
/// the same contents, or delegates every key when the file is missing. This
/// makes it useful as a per-key node, e.g. a secret mounted at a fixed path.
///
/// When the file is missing and a [`MountHook`] is installed, the hook runs
/// once and the file is checked again. A failing hook is logged and otherwise
/// ignored.
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::{DefaultSource, FileSource};
/// use cfgchain::domain::ConfigValue;
/// use cfgchain::ports::Resolver;
///
/// let source = FileSource::new("/nonexistent/secret.txt")
///     .with_next(Box::new(DefaultSource::new("fallback")));
/// assert_eq!(source.resolve("token").unwrap(), Some(ConfigValue::from("fallback")));
/// ```
pub struct FileSource {
    path: PathBuf,
    mount_hook: Option<Box<dyn MountHook>>,
    next: Option<Box<dyn Resolver>>,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mount_hook: None,
            next: None,
        }
    }

    /// Installs a hook that is run when the file is missing.
    pub fn with_mount_hook(self, hook: impl MountHook + 'static) -> Self {
        self.with_boxed_mount_hook(Box::new(hook))
    }

    /// Like [`with_mount_hook`](Self::with_mount_hook) for an already boxed hook.
    pub fn with_boxed_mount_hook(mut self, hook: Box<dyn MountHook>) -> Self {
        self.mount_hook = Some(hook);
        self
    }

    /// Installs the successor consulted when the file is missing.
    pub fn with_next(mut self, next: Box<dyn Resolver>) -> Self {
        self.next = Some(next);
        self
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the file currently exists.
    ///
    /// Errors other than "not found" (e.g. permission denied on a parent
    /// directory) are reported rather than treated as absence.
    pub fn exists(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ConfigError::source_io(
                "file",
                "Failed to stat",
                &self.path,
                e,
            )),
        }
    }

    /// Reads the file, running the mount hook at most once if it is missing.
    ///
    /// Returns `Ok(None)` if the file is still missing afterwards.
    pub fn read_contents(&self) -> Result<Option<String>> {
        if !self.exists()? {
            let Some(hook) = &self.mount_hook else {
                return Ok(None);
            };

            tracing::debug!("'{}' is missing, running mount hook", self.path.display());
            if let Err(e) = hook.mount() {
                tracing::warn!("Mount hook for '{}' failed: {}", self.path.display(), e);
            }

            if !self.exists()? {
                tracing::debug!("'{}' still missing after mount hook", self.path.display());
                return Ok(None);
            }
        }

        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            // Removed between the existence check and the read.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::source_io("file", "Failed to read", &self.path, e)),
        }
    }
}

impl Resolver for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        match self.read_contents()? {
            Some(contents) => {
                tracing::debug!("'file' answered '{}' from '{}'", key, self.path.display());
                Ok(Some(ConfigValue::String(contents)))
            }
            None => self.get_from_next_handler(key),
        }
    }

    fn next_handler(&self) -> Option<&dyn Resolver> {
        self.next.as_deref()
    }
}

impl_link!(FileSource);
