// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup key newtype.
//!
//! Keys are opaque and case-sensitive. No format is imposed: `"NAME"`,
//! `"database.host"`, `"dry_run"` and the empty string are all valid keys, and
//! every source compares them byte for byte.

use std::borrow::Borrow;
use std::fmt;

/// A configuration key as handed down a resolver chain.
///
/// # Examples
///
/// ```
/// use cfgchain::domain::ConfigKey;
///
/// let key = ConfigKey::from("APP_VERBOSITY");
/// assert_eq!(key.as_str(), "APP_VERBOSITY");
/// assert_ne!(key, ConfigKey::from("app_verbosity"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a key from an owned string.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&String> for ConfigKey {
    fn from(s: &String) -> Self {
        ConfigKey(s.clone())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<ConfigKey, _>` be probed with a plain `&str`.
impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
