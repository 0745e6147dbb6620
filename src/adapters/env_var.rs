// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable resolver node.
//!
//! Keys are matched against variable names exactly: no prefix stripping, no
//! case folding, no underscore translation.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::Resolver;
use std::collections::HashMap;
use std::env;

/// Resolver node backed by environment variables.
///
/// The variables are captured when the source is built, so a chain sees one
/// consistent environment for its whole lifetime and tests can inject their
/// own snapshot with [`with_values`](Self::with_values).
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::EnvironmentSource;
/// use cfgchain::domain::ConfigValue;
/// use cfgchain::ports::Resolver;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("APP_VERBOSITY".to_string(), "warning".to_string());
///
/// let source = EnvironmentSource::with_values(vars);
/// assert_eq!(source.resolve("APP_VERBOSITY").unwrap(), Some(ConfigValue::from("warning")));
/// assert_eq!(source.resolve("app_verbosity").unwrap(), None);
/// ```
pub struct EnvironmentSource {
    vars: HashMap<String, String>,
    next: Option<Box<dyn Resolver>>,
}

impl EnvironmentSource {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut vars = HashMap::new();
        for (key, value) in env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (key, _) => {
                    tracing::debug!("Skipping non UTF-8 environment variable {:?}", key);
                }
            }
        }

        tracing::debug!("Captured {} environment variables", vars.len());
        Self::with_values(vars)
    }

    /// Uses `vars` in place of the process environment.
    pub fn with_values(vars: HashMap<String, String>) -> Self {
        Self { vars, next: None }
    }

    /// Installs the successor consulted for unset variables.
    pub fn with_next(mut self, next: Box<dyn Resolver>) -> Self {
        self.next = Some(next);
        self
    }
}

impl Default for EnvironmentSource {
    fn default() -> Self {
        Self::from_process()
    }
}

impl Resolver for EnvironmentSource {
    fn name(&self) -> &str {
        "env"
    }

    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        match self.vars.get(key.as_str()) {
            Some(value) => {
                tracing::debug!("'env' answered '{}'", key);
                Ok(Some(ConfigValue::from(value.as_str())))
            }
            None => self.get_from_next_handler(key),
        }
    }

    fn next_handler(&self) -> Option<&dyn Resolver> {
        self.next.as_deref()
    }
}

impl_link!(EnvironmentSource);
