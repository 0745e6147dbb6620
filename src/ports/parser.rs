// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured document parser trait definition.
//!
//! Mapping sources and structured file sources both need to turn text into a
//! top-level key/value structure. This port keeps them independent of the
//! concrete format.

use crate::domain::{ConfigMap, Result};

/// A trait for parsing structured configuration documents.
///
/// The document must parse to a top-level mapping. Values keep their native
/// shape: nested mappings stay nested and are not flattened into dotted keys.
/// Any other top-level shape (a list, a bare scalar, an empty document) is a
/// [`ConfigError::ParseError`](crate::domain::ConfigError::ParseError).
///
/// # Examples
///
/// ```rust
/// use cfgchain::domain::{ConfigMap, ConfigValue, Result};
/// use cfgchain::ports::ConfigParser;
///
/// struct KeyEqualsValue;
///
/// impl ConfigParser for KeyEqualsValue {
///     fn parse(&self, content: &str) -> Result<ConfigMap> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.to_string(), ConfigValue::from(v)))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["env"]
///     }
/// }
///
/// let map = KeyEqualsValue.parse("NAME=fixme").unwrap();
/// assert_eq!(map.get("NAME"), Some(&ConfigValue::from("fixme")));
/// ```
pub trait ConfigParser {
    /// Parses `content` into its top-level mapping.
    fn parse(&self, content: &str) -> Result<ConfigMap>;

    /// Returns the file extensions (without the leading dot) this parser reads.
    fn supported_extensions(&self) -> &[&str];
}
