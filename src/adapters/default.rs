// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal resolver node that answers every key.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::Resolver;

/// Resolver node that returns one fixed value for every key.
///
/// It has no successor slot and does not implement [`Link`](crate::ports::Link):
/// nothing placed after it could ever be reached, so it can only close a chain.
///
/// ```rust
/// use cfgchain::adapters::DefaultSource;
/// use cfgchain::domain::ConfigValue;
/// use cfgchain::ports::Resolver;
///
/// let source = DefaultSource::new("info");
/// assert_eq!(source.resolve("anything").unwrap(), Some(ConfigValue::from("info")));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultSource {
    value: ConfigValue,
}

impl DefaultSource {
    /// Creates a source answering `value` for every key.
    pub fn new(value: impl Into<ConfigValue>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the fixed answer.
    pub fn value(&self) -> &ConfigValue {
        &self.value
    }
}

impl Resolver for DefaultSource {
    fn name(&self) -> &str {
        "default"
    }

    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        tracing::debug!("'default' answered '{}'", key);
        Ok(Some(self.value.clone()))
    }

    fn next_handler(&self) -> Option<&dyn Resolver> {
        None
    }
}
