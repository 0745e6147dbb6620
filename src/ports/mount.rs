// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mount hook trait definition.
//!
//! Some backing files only appear after something has been attached: a remote
//! share, a secrets volume, a FUSE filesystem. A file source can carry a hook
//! that provisions the file the first time a request finds it missing.

use crate::domain::Result;

/// A capability that tries to bring a backing file into existence.
///
/// # Contract
///
/// * The hook is called at most once per `handle_request`, and only when the
///   file is missing at that moment.
/// * A failed hook does not fail the request. The file source logs the error
///   and checks for the file again; that second check decides whether the
///   source answers or delegates.
/// * Nothing serializes hook calls. A chain shared between threads may run the
///   hook concurrently.
///
/// Closures of the form `Fn() -> Result<()>` are hooks.
///
/// # Examples
///
/// ```rust
/// use cfgchain::ports::MountHook;
///
/// let hook = || -> cfgchain::domain::Result<()> {
///     std::fs::create_dir_all(std::env::temp_dir())?;
///     Ok(())
/// };
/// assert!(hook.mount().is_ok());
/// ```
pub trait MountHook: Send + Sync {
    /// Attempts to provision the backing resource.
    fn mount(&self) -> Result<()>;
}

impl<F> MountHook for F
where
    F: Fn() -> Result<()> + Send + Sync,
{
    fn mount(&self) -> Result<()> {
        self()
    }
}
